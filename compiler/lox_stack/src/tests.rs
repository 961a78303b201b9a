use super::*;

/// Recurses `depth` frames deep with a growth check in every frame.
fn nested_sum(depth: u32) -> u32 {
    grow(|| if depth == 0 { 0 } else { 1 + nested_sum(depth - 1) })
}

#[test]
fn test_grow_passes_result_through() {
    assert_eq!(grow(|| "value"), "value");
    let result: Result<u8, String> = grow(|| Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
}

#[test]
fn test_shallow_recursion() {
    assert_eq!(nested_sum(50), 50);
}

#[test]
fn test_recursion_beyond_default_stack() {
    assert_eq!(nested_sum(200_000), 200_000);
}

#[test]
fn test_remaining_is_reported_on_native_targets() {
    if cfg!(not(target_arch = "wasm32")) {
        assert!(remaining().is_some_and(|bytes| bytes > 0));
    }
}
