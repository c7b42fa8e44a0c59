use crate::models::domain::currency::{CurrencyConfig, CurrencyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Native,
    Trc10,
    Trc20,
}

/// 配置时解析一次的币种类型，之后按 kind 路由，不再检查 options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCurrency {
    pub kind: CurrencyKind,
    pub config: CurrencyConfig,
}

/// 按类型分桶后的币种配置，保持配置顺序
#[derive(Debug, Clone, Default)]
pub struct CurrencyBuckets {
    pub native: Vec<RoutedCurrency>,
    pub trc10: Vec<RoutedCurrency>,
    pub trc20: Vec<RoutedCurrency>,
}

impl CurrencyBuckets {
    pub fn classify(currencies: &[CurrencyConfig]) -> Self {
        let mut buckets = Self::default();
        for currency in currencies {
            let kind = currency.kind();
            let bucket = match kind {
                CurrencyKind::Trc10(_) => &mut buckets.trc10,
                CurrencyKind::Trc20(_) => &mut buckets.trc20,
                CurrencyKind::NativeCoin => &mut buckets.native,
            };
            bucket.push(RoutedCurrency {
                kind,
                config: currency.clone(),
            });
        }
        buckets
    }

    pub fn bucket(&self, kind: TokenKind) -> &[RoutedCurrency] {
        match kind {
            TokenKind::Native => &self.native,
            TokenKind::Trc10 => &self.trc10,
            TokenKind::Trc20 => &self.trc20,
        }
    }

    /// 返回所有跟踪该 token 的币种；同一合约可以对应多个账本币种。
    /// 原生币桶没有 token 标识，直接返回整个桶。
    pub fn match_token(&self, kind: TokenKind, token: &str) -> Vec<&CurrencyConfig> {
        self.bucket(kind)
            .iter()
            .filter(|routed| match (kind, &routed.kind) {
                (TokenKind::Native, _) => true,
                (TokenKind::Trc10, CurrencyKind::Trc10(id)) => id == token,
                (TokenKind::Trc20, CurrencyKind::Trc20(contract)) => contract == token,
                _ => false,
            })
            .map(|routed| &routed.config)
            .collect()
    }

    /// 按账本币种代码查找
    pub fn find(&self, currency_id: &str) -> Option<&RoutedCurrency> {
        self.native
            .iter()
            .chain(&self.trc10)
            .chain(&self.trc20)
            .find(|routed| routed.config.id == currency_id)
    }

    pub fn is_empty(&self) -> bool {
        self.native.is_empty() && self.trc10.is_empty() && self.trc20.is_empty()
    }
}
