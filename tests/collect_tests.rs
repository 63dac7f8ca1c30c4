//! Integration tests for the collection engine.
//!
//! Every operation is exercised on sequences and mappings, both applied
//! directly and as a reusable, partially applied value.

use kollect::collect::*;
use kollect::pipe;
use kollect::{Deferred, Error};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

fn int(value: &Value) -> i64 {
    value.as_i64().unwrap_or_default()
}

// =============================================================================
// map / filter / reduce
// =============================================================================

#[rstest]
#[case(json!([1, 2, 3, 4]), json!([11, 12, 13, 14]))]
#[case(json!({ "apple": 5, "pear": 10 }), json!({ "apple": 15, "pear": 20 }))]
fn test_map_keeps_variant(#[case] container: Value, #[case] expected: Value) {
    let add_ten = map(|item: &Value, _| int(item) + 10);
    assert_eq!(add_ten.apply(&container), Ok(expected));
}

#[rstest]
fn test_map_receives_keys() {
    let labelled = map(|item: &Value, key| format!("{key}={item}"));
    assert_eq!(
        labelled.apply(json!({ "a": 1, "b": 2 })),
        Ok(json!({ "a": "a=1", "b": "b=2" }))
    );
    assert_eq!(labelled.apply(json!([true])), Ok(json!(["0=true"])));
}

#[rstest]
fn test_map_does_not_touch_input() {
    let data = json!([1, 2, 3, 4]);
    let _ = map(|item: &Value, _| int(item) * 2).apply(&data);
    assert_eq!(data, json!([1, 2, 3, 4]));
}

#[rstest]
fn test_filter_default_drops_useless_values() {
    let data = json!([0, 1, 2, null, true, 3, 4, "", false, 5, 6, "", 7, [], 8, 9, {}, 10]);
    assert_eq!(
        filter().apply(data),
        Ok(json!([0, 1, 2, true, 3, 4, false, 5, 6, 7, 8, 9, 10]))
    );
}

#[rstest]
fn test_filter_mapping() {
    let data = json!({ "books": 194, "users": 1458, "collections": 500, "kits": null });
    assert_eq!(
        filter().by(|value: &Value, _| int(value) < 1000).apply(&data),
        Ok(json!({ "books": 194, "collections": 500, "kits": null }))
    );
    assert_eq!(
        filter().apply(&data),
        Ok(json!({ "books": 194, "users": 1458, "collections": 500 }))
    );
}

#[rstest]
#[case(json!([1, 2, 3, 4]), None, json!(10))]
#[case(json!({ "wood": 150, "stone": 50, "gold": 10 }), None, json!(210))]
#[case(json!([1, 2, 3, 4]), Some(json!(10)), json!(20))]
#[case(json!([]), Some(json!(7)), json!(7))]
fn test_reduce(#[case] container: Value, #[case] seed: Option<Value>, #[case] expected: Value) {
    let sum = reduce(|total: Value, item: &Value| int(&total) + int(item));
    let sum = match seed {
        Some(seed) => sum.seed(seed),
        None => sum,
    };
    assert_eq!(sum.apply(container), Ok(expected));
}

#[rstest]
fn test_reduce_empty_without_seed() {
    let sum = reduce(|total: Value, item: &Value| int(&total) + int(item));
    assert!(matches!(
        sum.apply(json!([])),
        Err(Error::TypeKind { operation: "reduce", .. })
    ));
}

// =============================================================================
// each / apply / every / some
// =============================================================================

#[rstest]
fn test_each_accumulates_across_calls() {
    let total = Arc::new(AtomicI64::new(0));
    let counter = Arc::clone(&total);
    let add_total = each(move |item: &Value, _| {
        counter.fetch_add(int(item), Ordering::SeqCst);
    });

    assert_eq!(add_total.apply(json!([1, 2])), Ok(json!([1, 2])));
    assert_eq!(total.load(Ordering::SeqCst), 3);
    let _ = add_total.apply(json!({ "a": 3, "b": 4 }));
    assert_eq!(total.load(Ordering::SeqCst), 10);
}

#[rstest]
#[case(json!([5, 3]))]
#[case(json!({ "grape": 3, "apple": 5 }))]
fn test_apply_spreads_values(#[case] container: Value) {
    let sum = apply(|values: &[Value]| values.iter().map(int).sum::<i64>());
    assert_eq!(sum.apply(container), Ok(json!(8)));
}

#[rstest]
fn test_apply_greeting() {
    let greet = apply(|values: &[Value]| {
        format!("{} {}!", values[1].as_str().unwrap_or_default(), values[0].as_str().unwrap_or_default())
    });
    assert_eq!(greet.apply(json!(["John", "Hello"])), Ok(json!("Hello John!")));
}

#[rstest]
#[case(json!([3, 4, 5, 6]), true)]
#[case(json!([1, 2, 3, 4]), false)]
#[case(json!({ "grape": 5, "pineapple": 10 }), true)]
#[case(json!([]), true)]
fn test_every(#[case] container: Value, #[case] expected: bool) {
    assert_eq!(every(|value: &Value, _| int(value) > 2).apply(container), Ok(expected));
}

#[rstest]
fn test_some_forms() {
    let philosopher = json!({ "name": "Aristokles", "last": "Platon" });
    assert_eq!(some(3).apply(json!([1, 2, 3])), Ok(true));
    assert_eq!(some("name").apply(&philosopher), Ok(true));
    assert_eq!(some("Platon").apply(&philosopher), Ok(true));
    assert_eq!(
        some_entry("name", "Pisagor").apply(json!({ "name": "Theano", "year": 570 })),
        Ok(false)
    );
    assert_eq!(
        some_by(|value: &Value, _| int(value) > 0).apply(json!({ "books": 0, "users": 3 })),
        Ok(true)
    );
    assert_eq!(some_by(|value: &Value, _| int(value) > 5).apply(json!([1, 2, 3])), Ok(false));
}

// =============================================================================
// access
// =============================================================================

#[rstest]
fn test_keys_values_entries() {
    let club = json!({ "club": "Liverpool", "nickname": "The Reds" });
    assert_eq!(keys().apply(&club), Ok(json!(["club", "nickname"])));
    assert_eq!(values().apply(&club), Ok(json!(["Liverpool", "The Reds"])));
    assert_eq!(
        entries().apply(json!({ "a": 1, "b": "2", "c": true })),
        Ok(json!([["a", 1], ["b", "2"], ["c", true]]))
    );
    assert_eq!(keys().apply(json!(["x", "y"])), Ok(json!([0, 1])));
}

#[rstest]
#[case(json!([1, 2, 3]), Some(json!(3)))]
#[case(json!({ "name": "İsmâil", "last": "Cezerî" }), Some(json!("Cezerî")))]
#[case(json!([]), None)]
fn test_last(#[case] container: Value, #[case] expected: Option<Value>) {
    assert_eq!(last().apply(container), Ok(expected));
}

#[rstest]
fn test_last_by_predicate() {
    let small = last().by(|item: &Value, _| int(item) < 300);
    assert_eq!(
        small.apply(json!({ "teachers": 30, "books": 194, "users": 1458, "collections": 500 })),
        Ok(Some(json!(194)))
    );
    assert_eq!(last().by(|item: &Value, _| int(item) < 2).apply(json!([1, 2, 3])), Ok(Some(json!(1))));
}

#[rstest]
#[case(json!("c"), json!("abcd"), true)]
#[case(json!("e"), json!("abcd"), false)]
#[case(json!(3), json!([1, 2, 3, 4]), true)]
#[case(json!(5), json!([1, 2, 3, 4]), false)]
#[case(json!("name"), json!({ "name": "Fârâbî" }), true)]
#[case(json!("lastname"), json!({ "name": "Fârâbî" }), false)]
fn test_has(#[case] needle: Value, #[case] container: Value, #[case] expected: bool) {
    assert_eq!(has(needle).apply(container), Ok(expected));
}

#[rstest]
fn test_value_paths() {
    assert_eq!(
        value("type").apply(json!([{ "type": "element" }, { "type": "text" }])),
        Ok(json!(["element", "text"]))
    );
    assert_eq!(value("name").apply(json!({ "name": "Cahit", "last": "Arf" })), Ok(json!("Cahit")));
    assert_eq!(
        value("roles.1.name").apply(json!({ "name": "Cahit", "roles": [{ "name": "Editor" }, { "name": "Admin" }] })),
        Ok(json!("Admin"))
    );
    assert_eq!(value("missing").apply(json!({})), Ok(Value::Null));
}

#[rstest]
#[case("name", json!({ "name": "Sabuncuoğlu", "last": "Şerefeddin" }), json!(["Sabuncuoğlu"]))]
#[case("name", json!([{ "id": 78, "name": "Nikola" }, { "id": 79, "name": "Tesla" }]), json!(["Nikola", "Tesla"]))]
#[case("roles.0.name", json!({ "name": "John", "roles": [{ "name": "Editor" }, { "name": "Admin" }] }), json!(["Editor"]))]
#[case(
    "roles.*.name",
    json!([
        { "id": 1, "roles": [{ "name": "Editor" }, { "name": "Admin" }] },
        { "id": 2, "roles": [{ "name": "Super User" }, { "name": "Writer" }] },
    ]),
    json!([["Editor", "Admin"], ["Super User", "Writer"]])
)]
fn test_pluck(#[case] path: &str, #[case] container: Value, #[case] expected: Value) {
    assert_eq!(pluck(path).apply(container), Ok(expected));
}

#[rstest]
fn test_pluck_keyed() {
    let people = json!([
        { "id": 78, "subs": { "id": 17 }, "name": "Thomas" },
        { "id": 79, "subs": { "id": 18 }, "name": "Edison" },
    ]);
    assert_eq!(
        pluck("name").key_by("subs.id").apply(people),
        Ok(json!({ "17": "Thomas", "18": "Edison" }))
    );
}

// =============================================================================
// shape
// =============================================================================

#[rstest]
#[case(4, json!([1, 2, 3, 4, 5, 6, 7]), json!([[1, 2, 3, 4], [5, 6, 7]]))]
#[case(2, json!([1, 2, 3, 4, 5, 6, 7]), json!([[1, 2], [3, 4], [5, 6], [7]]))]
#[case(
    2,
    json!({ "name": "Albert", "last": "Einstein", "age": "∞" }),
    json!([{ "name": "Albert", "last": "Einstein" }, { "age": "∞" }])
)]
fn test_chunk(#[case] size: usize, #[case] container: Value, #[case] expected: Value) {
    assert_eq!(chunk(size).apply(container), Ok(expected));
}

#[rstest]
fn test_chunk_zero_is_invalid() {
    assert!(matches!(
        chunk(0).apply(json!([1])),
        Err(Error::InvalidArgument { operation: "chunk", .. })
    ));
}

#[rstest]
fn test_split() {
    assert_eq!(split("&").apply(json!("id=1&book=5")), Ok(json!(["id=1", "book=5"])));
    assert_eq!(split(3).apply(json!([1, 2, 3, 4, 5])), Ok(json!([[1, 2], [3, 4], [5]])));
}

#[rstest]
fn test_flat_depths() {
    let nested = json!([0, 1, [2, [3, [4, 5]]]]);
    assert_eq!(flat().apply(&nested), Ok(json!([0, 1, 2, [3, [4, 5]]])));
    assert_eq!(flat().depth(2).apply(&nested), Ok(json!([0, 1, 2, 3, [4, 5]])));
    assert_eq!(flat().depth(Depth::Infinite).apply(&nested), Ok(json!([0, 1, 2, 3, 4, 5])));
    assert_eq!(flat().depth(0).apply(&nested), Ok(nested.clone()));
}

#[rstest]
fn test_flat_mapping_values() {
    let schedule = json!({ "day": "monday", "appointments": ["09:00", "10:00", "11:00"] });
    assert_eq!(flat().apply(schedule), Ok(json!(["monday", "09:00", "10:00", "11:00"])));
}

#[rstest]
#[case(3, json!([1, 2, 3, 4, 5, 6, 7]), json!([1, 2, 3]))]
#[case(-3, json!([1, 2, 3, 4, 5, 6, 7]), json!([5, 6, 7]))]
#[case(1, json!({ "name": "Isaac", "last": "Newton" }), json!({ "name": "Isaac" }))]
#[case(-1, json!({ "name": "Isaac", "last": "Newton" }), json!({ "last": "Newton" }))]
fn test_take(#[case] count: i64, #[case] container: Value, #[case] expected: Value) {
    assert_eq!(take(count).apply(container), Ok(expected));
}

#[rstest]
fn test_take_until() {
    assert_eq!(take_until(3).apply(json!([1, 2, 3])), Ok(json!([1, 2])));
    assert_eq!(
        take_until_by(|item: &Value, _| int(item) >= 1000)
            .apply(json!({ "books": 194, "users": 1458, "collections": 500 })),
        Ok(json!({ "books": 194 }))
    );
}

#[rstest]
fn test_slice() {
    let data = json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(slice(4).apply(&data), Ok(json!([5, 6, 7, 8, 9, 10])));
    assert_eq!(slice(4).length(2).apply(&data), Ok(json!([5, 6])));
    assert_eq!(slice(0).step(3).apply(&data), Ok(json!([1, 4, 7, 10])));
    assert_eq!(slice(0).length(3).step(2).apply(&data), Ok(json!([1, 3])));
    assert_eq!(slice(2).length(6).step(2).apply(&data), Ok(json!([3, 5, 7])));
    assert_eq!(slice(-2).apply(&data), Ok(json!([9, 10])));
    assert!(slice(0).step(0).apply(&data).is_err());
}

#[rstest]
fn test_reverse_variants() {
    assert_eq!(reverse().apply(json!([1, 2, 3, 4, 5])), Ok(json!([5, 4, 3, 2, 1])));
    assert_eq!(reverse().apply(json!("abc")), Ok(json!("cba")));
}

#[rstest]
fn test_key_map_indexes_every_path() {
    let users = json!([{ "name": "John", "roles": [{ "name": "Editor" }, { "name": "Admin" }] }]);
    assert_eq!(
        key_map().apply(users),
        Ok(json!({
            "0": { "name": "John", "roles": [{ "name": "Editor" }, { "name": "Admin" }] },
            "0.name": "John",
            "0.roles": [{ "name": "Editor" }, { "name": "Admin" }],
            "0.roles.0": { "name": "Editor" },
            "0.roles.0.name": "Editor",
            "0.roles.1": { "name": "Admin" },
            "0.roles.1.name": "Admin",
        }))
    );
}

// =============================================================================
// combine
// =============================================================================

#[rstest]
#[case(json!(["orange"]), json!(["apple", "pear"]), json!(["apple", "pear", "orange"]))]
#[case(
    json!({ "name": "Nikola", "last": "Tesla" }),
    json!({ "age": 32 }),
    json!({ "name": "Nikola", "last": "Tesla", "age": 32 })
)]
fn test_merge(#[case] seed: Value, #[case] container: Value, #[case] expected: Value) {
    assert_eq!(merge(seed).apply(container), Ok(expected));
}

#[rstest]
#[case(json!([1, 2, 3, 4, 7]), json!([1, 2, 3, 4, 5, 6, 7]), json!([5, 6]))]
#[case(
    json!({ "name": "Of Mice and Men" }),
    json!({ "name": "Of Mice and Men", "writer": "John Steinbeck" }),
    json!({ "writer": "John Steinbeck" })
)]
fn test_diff(#[case] base: Value, #[case] container: Value, #[case] expected: Value) {
    assert_eq!(diff(base).apply(container), Ok(expected));
}

#[rstest]
fn test_join_and_implode() {
    assert_eq!(join(",").apply(json!(["a", "b", "c"])), Ok(json!("a,b,c")));
    assert_eq!(Join::default().apply(json!(["a", "b", "c"])), Ok(json!("a,b,c")));
    assert_eq!(implode("-").apply(json!([1, 2, 3, 4, 5])), Ok(json!("1-2-3-4-5")));
    let products = json!([
        { "product": "ChromeOS", "company": "Google" },
        { "product": "ChatGPT", "company": "OpenAI" },
        { "product": "VS Code", "company": "Microsoft" },
    ]);
    assert_eq!(
        implode(", ").key("product").apply(products),
        Ok(json!("ChromeOS, ChatGPT, VS Code"))
    );
}

#[rstest]
fn test_prepend_forms() {
    assert_eq!(prepend(0).apply(json!([1, 2, 3])), Ok(json!([0, 1, 2, 3])));
    assert_eq!(prepend("?").apply(json!("category=1&book=5")), Ok(json!("?category=1&book=5")));
    assert_eq!(
        prepend_entry("brand", "Google").apply(json!({ "product": "ChromeOS" })),
        Ok(json!({ "brand": "Google", "product": "ChromeOS" }))
    );
}

// =============================================================================
// in place
// =============================================================================

#[rstest]
fn test_push_mutates_borrowed_container() {
    let mut data = json!([1, 2, 3]);
    assert_eq!(push(4).apply(&mut data), Ok(json!([1, 2, 3, 4])));
    let _ = push(json!([5, 6])).spread().apply(&mut data);
    assert_eq!(data, json!([1, 2, 3, 4, 5, 6]));

    let mut philosopher = json!({ "name": "Aristoteles" });
    let _ = push_entry("birth", "384 BC").apply(&mut philosopher);
    assert_eq!(philosopher, json!({ "name": "Aristoteles", "birth": "384 BC" }));
}

#[rstest]
fn test_pop_and_shift() {
    let mut data = json!([1, 2, 3, 4, 5]);
    assert_eq!(pop().apply(&mut data), Ok(json!(5)));
    assert_eq!(shift().count(2).apply(&mut data), Ok(json!([1, 2])));
    assert_eq!(data, json!([3, 4]));

    let mut astronomer = json!({ "name": "Ali", "last": "Kuşçu", "birth": "1403" });
    assert_eq!(
        pop().count(2).apply(&mut astronomer),
        Ok(json!({ "last": "Kuşçu", "birth": "1403" }))
    );
    assert_eq!(astronomer, json!({ "name": "Ali" }));
    assert_eq!(pop().apply(json!([])), Ok(Value::Null));
}

#[rstest]
fn test_splice_forms() {
    let mut data = json!([1, 2, 3, 4, 5]);
    assert_eq!(splice(2).apply(&mut data), Ok(json!([3, 4, 5])));
    assert_eq!(data, json!([1, 2]));

    let mut data = json!([1, 2, 3, 4, 5]);
    assert_eq!(
        splice(2).delete(1).insert([json!(10), json!(11)]).apply(&mut data),
        Ok(json!([3]))
    );
    assert_eq!(data, json!([1, 2, 10, 11, 4, 5]));
}

#[rstest]
fn test_remove() {
    assert_eq!(remove(json!([0, 1])).apply(json!([1, 2, 3, 4])), Ok(json!([null, null, 3, 4])));
    let mut sailor = json!({ "name": "Pîrî", "last": "Reis", "date": 1553 });
    let _ = remove("date").apply(&mut sailor);
    assert_eq!(sailor, json!({ "name": "Pîrî", "last": "Reis" }));
}

// =============================================================================
// composition
// =============================================================================

#[rstest]
fn test_pipe_through_shapes() {
    let result = pipe!(
        json!([{ "id": 1, "tags": ["a", "b"] }, { "id": 2, "tags": ["c"] }]),
        pluck("tags"),
        flat(),
        map(|tag: &Value, _| tag.as_str().unwrap_or_default().to_uppercase()),
        join("|")
    );
    assert_eq!(result, Ok(json!("A|B|C")));
}

#[rstest]
fn test_operation_is_reusable_after_failure() {
    let first = take(1);
    assert!(first.apply(json!(1)).is_err());
    assert_eq!(first.apply(json!([9, 8])), Ok(json!([9])));
}

#[rstest]
fn test_operations_accept_ready_deferred() {
    let pending = map(|item: &Value, _| int(item) + 1).apply(Deferred::pure(json!([1])));
    assert_eq!(futures::executor::block_on(pending), Ok(json!([2])));
}
