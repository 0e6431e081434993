/// Runs file I/O inline on the UI thread; every call site is a short,
/// user-initiated read or write.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
