//! 日志模块：env_logger 控制台彩色输出 + 同步写入滚动日志文件
use env_logger::fmt::Formatter;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter, Record};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

const LOG_DIR: &str = "LOG_DIR";
const DEFAULT_LOG_DIR: &str = "logs";
const LOG_LEVEL: &str = "LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const LOG_FILE_NAME: &str = "tron-adapter.log";
const LOG_MAX_SIZE_MB: u64 = 10;
const LOG_MAX_ROTATIONS: usize = 5;

static INIT_LOGGER: Once = Once::new();
static FILE_WRITER: Mutex<Option<File>> = Mutex::new(None);

struct LogSettings {
    dir: PathBuf,
    level_name: String,
    level: LevelFilter,
}

impl LogSettings {
    fn from_env() -> Self {
        let dir = std::env::var(LOG_DIR).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
        let level_name = std::env::var(LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_uppercase();
        let level = parse_level(&level_name).unwrap_or_else(|| {
            eprintln!("⚠️ 无效日志级别「{}」，使用默认 INFO", level_name);
            LevelFilter::Info
        });
        Self {
            dir: PathBuf::from(dir),
            level_name,
            level,
        }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }
}

fn parse_level(name: &str) -> Option<LevelFilter> {
    match name {
        "TRACE" => Some(LevelFilter::Trace),
        "DEBUG" => Some(LevelFilter::Debug),
        "INFO" => Some(LevelFilter::Info),
        "WARN" => Some(LevelFilter::Warn),
        "ERROR" => Some(LevelFilter::Error),
        _ => None,
    }
}

/// 初始化日志系统（全局只生效一次）
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let settings = LogSettings::from_env();

        if let Err(e) = fs::create_dir_all(&settings.dir) {
            eprintln!("❌ 创建日志目录失败: {}", e);
        }
        if let Err(e) = rotate_logs(&settings.dir) {
            eprintln!("⚠️ 日志轮转失败: {}", e);
        }
        let file_enabled = open_log_file(&settings.file_path());

        let mut builder = Builder::from_default_env();
        builder
            .filter(None, settings.level)
            .filter(Some("reqwest"), LevelFilter::Warn)
            .filter(Some("hyper"), LevelFilter::Warn)
            .filter(Some("hyper_util"), LevelFilter::Warn)
            .write_style(WriteStyle::Always)
            .format(move |f: &mut Formatter, record: &Record| {
                let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S.%3f");
                let module = record.module_path().unwrap_or("unknown");
                if file_enabled {
                    mirror_to_file(&format!(
                        "[{}] [线程: {}] [模块: {}] [级别: {}] - {}\n",
                        now,
                        std::thread::current().name().unwrap_or("unknown"),
                        module,
                        record.level(),
                        record.args()
                    ));
                }
                writeln!(
                    f,
                    "[{}] [{}{:>5}\x1b[0m] [\x1b[31m{}\x1b[0m] - {}",
                    now,
                    level_color(record.level()),
                    record.level(),
                    module,
                    record.args()
                )
            })
            .target(Target::Stdout);

        match builder.try_init() {
            Ok(()) => log::info!(
                "✅ 日志系统初始化完成 | 级别: {} | 日志文件: {}",
                settings.level_name,
                settings.file_path().display()
            ),
            Err(e) => eprintln!("❌ 控制台日志初始化失败: {}", e),
        }
    });
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[91m",
        Level::Warn => "\x1b[93m",
        Level::Info => "\x1b[92m",
        Level::Debug => "\x1b[96m",
        Level::Trace => "\x1b[95m",
    }
}

fn open_log_file(path: &Path) -> bool {
    match File::create(path) {
        Ok(file) => {
            if let Ok(mut writer) = FILE_WRITER.lock() {
                *writer = Some(file);
            }
            true
        }
        Err(e) => {
            eprintln!("❌ 创建日志文件失败: {}", e);
            false
        }
    }
}

// 文件写入失败不影响控制台输出
fn mirror_to_file(line: &str) {
    if let Ok(mut writer) = FILE_WRITER.lock() {
        if let Some(file) = writer.as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// 超过阈值时 name.log → name.log.1 → ... → name.log.N
fn rotate_logs(dir: &Path) -> io::Result<()> {
    let current = dir.join(LOG_FILE_NAME);
    if !current.exists() {
        return Ok(());
    }

    let size_mb = fs::metadata(&current)?.len() / (1024 * 1024);
    if size_mb < LOG_MAX_SIZE_MB {
        return Ok(());
    }

    for i in (1..LOG_MAX_ROTATIONS).rev() {
        let src = dir.join(format!("{}.{}", LOG_FILE_NAME, i));
        if src.exists() {
            fs::rename(&src, dir.join(format!("{}.{}", LOG_FILE_NAME, i + 1)))?;
        }
    }
    fs::rename(&current, dir.join(format!("{}.1", LOG_FILE_NAME)))
}

#[macro_export]
macro_rules! log_trace { ($($arg:tt)*) => { log::trace!($($arg)*) }; }
#[macro_export]
macro_rules! log_debug { ($($arg:tt)*) => { log::debug!($($arg)*) }; }
#[macro_export]
macro_rules! log_info  { ($($arg:tt)*) => { log::info!($($arg)*) }; }
#[macro_export]
macro_rules! log_warn  { ($($arg:tt)*) => { log::warn!($($arg)*) }; }
#[macro_export]
macro_rules! log_error { ($($arg:tt)*) => { log::error!($($arg)*) }; }
