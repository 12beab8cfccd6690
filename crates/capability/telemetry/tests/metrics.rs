use netping_telemetry::{
    metrics, new_operation_id, record_form_fallback, record_request_sent, record_write_latency_ms,
};

#[test]
fn operation_ids_are_unique_uuids() {
    let first = new_operation_id();
    let second = new_operation_id();
    assert_ne!(first, second);
    assert_eq!(first.len(), 36);
    assert!(uuid_like(&first));
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_request_sent();
    record_request_sent();
    record_form_fallback();
    record_write_latency_ms(120);
    let after = metrics().snapshot();

    assert!(after.requests_sent >= before.requests_sent + 2);
    assert!(after.form_fallbacks > before.form_fallbacks);
    assert!(after.write_latency_ms_total >= before.write_latency_ms_total + 120);
    assert!(after.write_latency_ms_count > before.write_latency_ms_count);
}

fn uuid_like(value: &str) -> bool {
    value
        .split('-')
        .map(str::len)
        .eq([8usize, 4, 4, 4, 12])
}
