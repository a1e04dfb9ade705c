// config.rs: compile-time defaults and their environment overrides.
//
// The compile-time values below are what `Params::default()` uses. The
// `init_*` helpers let `Params::from_env()` pick up process-wide overrides
// (`ZYPHRAX_CLEVEL`, `ZYPHRAX_BLOCK_SIZE`, `ZYPHRAX_NBWORKERS`). A value that
// does not parse as an unsigned integer is ignored and the default is kept.
// Range validation is not done here; it happens when the params are used.

use log::debug;

/// Default compression level (the original interface's default).
/// Can be overridden by the `ZYPHRAX_CLEVEL` environment variable.
pub const CLEVEL_DEFAULT: u32 = 3;

/// Lowest supported compression level.
pub const CLEVEL_MIN: u32 = 1;

/// Highest supported compression level.
pub const CLEVEL_MAX: u32 = 9;

/// Default block size (64 KiB).
/// Can be overridden by the `ZYPHRAX_BLOCK_SIZE` environment variable.
pub const BLOCK_SIZE_DEFAULT: usize = 64 * 1024;

/// Smallest block size accepted by the compressor.
///
/// The C-ABI `zyphrax_compress_bound` evaluates the bound at this size, so it
/// stays a safe ceiling for any valid block size.
pub const MIN_BLOCK_SIZE: usize = 64;

/// Largest block size accepted by the compressor (16 MiB).
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

/// Default number of worker threads; 1 runs everything on the calling thread.
/// Can be overridden by the `ZYPHRAX_NBWORKERS` environment variable.
pub const NB_WORKERS_DEFAULT: usize = 1;

/// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

const ENV_CLEVEL: &str = "ZYPHRAX_CLEVEL";
const ENV_BLOCK_SIZE: &str = "ZYPHRAX_BLOCK_SIZE";
const ENV_NBWORKERS: &str = "ZYPHRAX_NBWORKERS";

/// Parse a decimal unsigned value, ignoring surrounding whitespace.
fn parse_unsigned(name: &str, raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(
                "ignoring environment variable setting {name}={raw}: not a valid unsigned value"
            );
            None
        }
    }
}

/// Compression level from `ZYPHRAX_CLEVEL`, or [`CLEVEL_DEFAULT`].
pub fn init_c_level() -> u32 {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`init_c_level`]: `None` means the variable is unset.
pub fn init_c_level_from(env_val: Option<&str>) -> u32 {
    env_val
        .and_then(|raw| parse_unsigned(ENV_CLEVEL, raw))
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(CLEVEL_DEFAULT)
}

/// Block size from `ZYPHRAX_BLOCK_SIZE`, or [`BLOCK_SIZE_DEFAULT`].
pub fn init_block_size() -> usize {
    init_block_size_from(std::env::var(ENV_BLOCK_SIZE).ok().as_deref())
}

/// Testable core of [`init_block_size`].
pub fn init_block_size_from(env_val: Option<&str>) -> usize {
    env_val
        .and_then(|raw| parse_unsigned(ENV_BLOCK_SIZE, raw))
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(BLOCK_SIZE_DEFAULT)
}

/// Worker count from `ZYPHRAX_NBWORKERS`, or [`NB_WORKERS_DEFAULT`].
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`].
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    env_val
        .and_then(|raw| parse_unsigned(ENV_NBWORKERS, raw))
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(NB_WORKERS_DEFAULT)
}
