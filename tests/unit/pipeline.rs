use super::*;

#[test]
fn threading_defaults_to_sequential() {
    let threading = RenderThreading::default();
    assert!(!threading.parallel);
    assert!(threading.threads.is_none());
}

#[test]
fn zero_threads_is_rejected() {
    let err = build_thread_pool(Some(0)).unwrap_err();
    assert!(matches!(err, FablepressError::Validation(_)));
}

#[test]
fn explicit_thread_count_builds_a_matching_pool() {
    let pool = build_thread_pool(Some(2)).unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}

#[test]
fn default_thread_count_builds_a_pool() {
    let pool = build_thread_pool(None).unwrap();
    assert!(pool.current_num_threads() >= 1);
}

#[test]
fn stats_start_at_zero() {
    assert_eq!(RenderStats::default(), RenderStats {
        pages_total: 0,
        pages_rendered: 0,
        assets_missing: 0,
    });
}
