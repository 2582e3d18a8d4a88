/// Runs `f`, first growing the native stack if less than the red zone is left.
///
/// User functions may recurse arbitrarily deep, and every call re-enters the
/// evaluator recursively, so each invocation goes through here.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
