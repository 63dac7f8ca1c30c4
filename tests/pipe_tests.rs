//! Unit tests for the pipe! macro.
//!
//! Tests for left-to-right application of operations, including stages that
//! change the container's shape, in-place stages and deferred containers.

use kollect::collect::*;
use kollect::compose::times;
use kollect::{Deferred, Error, pipe};
use serde_json::{Value, json};

fn int(value: &Value) -> i64 {
    value.as_i64().unwrap_or_default()
}

// =============================================================================
// Basic pipe! tests
// =============================================================================

#[test]
fn test_pipe_value_only() {
    let result = pipe!(json!({ "a": 1 }));
    assert_eq!(result, json!({ "a": 1 }));
}

#[test]
fn test_pipe_single_stage() {
    assert_eq!(pipe!(json!([1, 2, 3, 4, 5, 6, 7]), chunk(2)), Ok(json!([[1, 2], [3, 4], [5, 6], [7]])));
}

#[test]
fn test_pipe_borrowed_container() {
    let data = json!([1, 2, 3]);
    let doubled = pipe!(&data, map(|item: &Value, _| int(item) * 2));
    assert_eq!(doubled, Ok(json!([2, 4, 6])));
    assert_eq!(data, json!([1, 2, 3]));
}

#[test]
fn test_pipe_three_stages() {
    // pipe!(x, f, g, h) = h(g(f(x)))
    let result = pipe!(
        json!([1, 2, 3, 4, 5, 6, 7]),
        diff(json!([1, 2, 3, 4, 7])),
        map(|item: &Value, _| int(item) * 10),
        reduce(|total: Value, item: &Value| int(&total) + int(item))
    );
    assert_eq!(result, Ok(json!(110)));
}

#[test]
fn test_pipe_stage_order_matters() {
    let reversed_then_taken = pipe!(json!([1, 2, 3]), reverse(), take(1));
    let taken_then_reversed = pipe!(json!([1, 2, 3]), take(1), reverse());
    assert_eq!(reversed_then_taken, Ok(json!([3])));
    assert_eq!(taken_then_reversed, Ok(json!([1])));
}

// =============================================================================
// Failures and lifted functions
// =============================================================================

#[test]
fn test_pipe_first_failure_wins() {
    let result = pipe!(json!("not a container"), chunk(2), flat());
    assert!(matches!(result, Err(Error::TypeKind { operation: "chunk", .. })));
}

#[test]
fn test_pipe_lifted_function() {
    let count = then(|value: &Value| Ok(value.as_array().map_or(0, Vec::len)));
    assert_eq!(pipe!(json!([null, 1, 2]), filter(), count), Ok(2));
}

#[test]
fn test_pipe_in_place_stage_on_owned_value() {
    assert_eq!(pipe!(json!([1, 2, 3]), push(4), shift().count(2)), Ok(json!([1, 2])));
}

// =============================================================================
// Deferred pipelines
// =============================================================================

#[tokio::test]
async fn test_pipe_deferred_source() {
    let pending = pipe!(
        Deferred::pure(json!([0, 1, 2, [3, 4]])),
        flat(),
        filter().by(|item: &Value, _| int(item) % 2 == 0)
    );
    assert_eq!(pending.await, Ok(json!([0, 2, 4])));
}

#[tokio::test]
async fn test_pipe_deferred_splice() {
    let pending = pipe!(Deferred::pure(json!([1, 2, 3, 4, 5])), splice(1).delete(2), join("+"));
    assert_eq!(pending.await, Ok(json!("2+3")));
}

// =============================================================================
// times
// =============================================================================

#[test]
fn test_times_walks_indices() {
    let data = [1, 2, 3];
    let mut total = 0;
    times(data.len(), |index| total += data[index]);
    assert_eq!(total, 6);
}
