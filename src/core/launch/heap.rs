use tracing::debug;

const MAX_HEAP_PREFIX: &str = "-Xmx";
const MIN_PERCENT: f64 = 1.0;
// Upper bound is padded exactly like this; 200.0001% is still accepted.
const MAX_PERCENT: f64 = 200.0001;

/// Rewrite `-Xmx<n>%` into an absolute `-Xmx<MB>m` based on installed RAM.
///
/// Percentages outside `[1, 200.0001]`, or options not of that shape, are returned unchanged.
pub fn rewrite_percent_heap(option: &str, physical_memory: u64) -> String {
    let Some(percent) = option
        .strip_prefix(MAX_HEAP_PREFIX)
        .and_then(|rest| rest.strip_suffix('%'))
        .and_then(|number| number.parse::<f64>().ok())
    else {
        return option.to_string();
    };

    if !(MIN_PERCENT..=MAX_PERCENT).contains(&percent) {
        return option.to_string();
    }

    let megabytes = ((percent / 100.0) * physical_memory as f64 / 1_000_000.0).round() as u64;
    let rewritten = format!("{}{}m", MAX_HEAP_PREFIX, megabytes);
    debug!("Heap option {} -> {}", option, rewritten);
    rewritten
}
