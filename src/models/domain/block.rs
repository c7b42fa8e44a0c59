use crate::models::domain::transfer::CanonicalTransaction;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub number: u64,
    pub transactions: Vec<CanonicalTransaction>,
}

impl Block {
    pub fn new(number: u64, transactions: Vec<CanonicalTransaction>) -> Self {
        Self {
            number,
            transactions,
        }
    }
}
