use domain::{DeviceFamily, LogicStatusData, SavedDevice};

#[test]
fn family_selected_from_model_string() {
    assert_eq!(DeviceFamily::from_model("UniPing server solution v3/SMS"), DeviceFamily::UniPing);
    assert_eq!(DeviceFamily::from_model("uniping v3"), DeviceFamily::UniPing);
    assert_eq!(DeviceFamily::from_model("NetPing 2/PWR-220 v3/ETH"), DeviceFamily::NetPing);
    assert_eq!(DeviceFamily::from_model(""), DeviceFamily::NetPing);
}

#[test]
fn input_tables_differ_by_family() {
    let netping = DeviceFamily::NetPing.capabilities();
    let uniping = DeviceFamily::UniPing.capabilities();

    let netping_codes: Vec<u32> = netping.input_options().iter().map(|o| o.code).collect();
    let uniping_codes: Vec<u32> = uniping.input_options().iter().map(|o| o.code).collect();

    assert!(netping_codes.contains(&128));
    assert!(!netping_codes.contains(&112));
    assert!(uniping_codes.contains(&112));
    assert!(!uniping_codes.contains(&128));
    assert_eq!(netping_codes.len(), 10);
    assert_eq!(uniping_codes.len(), 16);

    assert_eq!(netping.describe_input(128), "AC PWR");
    assert_eq!(uniping.describe_input(128), "Unknown input (128)");
    assert_eq!(uniping.describe_input(64), "CS ALARM");
}

#[test]
fn output_tables_differ_by_family() {
    let netping = DeviceFamily::NetPing.capabilities();
    let uniping = DeviceFamily::UniPing.capabilities();

    assert_eq!(netping.describe_output(177), "RELAY 2");
    assert_eq!(uniping.describe_output(177), "Unknown output (177)");
    assert_eq!(uniping.describe_output(240), "SMOKE RST");
    assert_eq!(netping.describe_output(240), "Unknown output (240)");
    assert_eq!(netping.describe_output(208), "IR 1");
}

#[test]
fn conditions_depend_on_input_group() {
    let netping = DeviceFamily::NetPing.capabilities();
    let uniping = DeviceFamily::UniPing.capabilities();

    assert_eq!(netping.describe_condition(32, 0), "below set T");
    assert_eq!(uniping.describe_condition(32, 0), "below threshold");
    assert_eq!(netping.describe_condition(48, 1), "responds");
    assert_eq!(netping.describe_condition(16, 1), "= log. 1");
    assert_eq!(netping.describe_condition(128, 0), "absent");
    assert_eq!(uniping.describe_condition(112, 5), "= fault");
    assert_eq!(netping.describe_condition(112, 5), "Unknown condition (5)");

    let smoke = uniping.condition_options(113);
    assert_eq!(smoke.iter().map(|o| o.code).collect::<Vec<_>>(), vec![0, 1, 4, 5]);

    let fallback = netping.condition_options(200);
    assert_eq!(fallback[0].label, "Condition 0");
}

#[test]
fn actions_depend_on_rule_type() {
    let caps = DeviceFamily::NetPing.capabilities();
    assert_eq!(caps.action_options(true).len(), 3);
    assert_eq!(caps.action_options(false).len(), 2);
    assert_eq!(caps.describe_action(true, 2), "toggle");
    assert_eq!(caps.describe_action(false, 2), "Unknown action (2)");
    assert_eq!(caps.rule_type_options()[1].label, "If");
}

#[test]
fn sensor_options_netping_appends_humidity() {
    let options = DeviceFamily::NetPing.capabilities().sensor_options(8, 0);
    assert_eq!(options.len(), 9);
    assert_eq!(options[0].label, "1");
    assert_eq!(options[8].code, 8);
    assert_eq!(options[8].label, "Rel. humidity");
}

#[test]
fn sensor_options_uniping_interleaves_humidity_slots() {
    let options = DeviceFamily::UniPing.capabilities().sensor_options(2, 2);
    let codes: Vec<u32> = options.iter().map(|o| o.code).collect();
    assert_eq!(codes, vec![0, 1, 2, 4, 3, 5]);
    assert_eq!(options[2].label, "RH sensor 1 - humidity");
    assert_eq!(options[4].label, "RH sensor 1 - temp.");
}

#[test]
fn saved_device_serializes_camel_case() {
    let device = SavedDevice {
        id: "dev-1".to_string(),
        name: "NetPing (10.0.0.5)".to_string(),
        ip_address: "10.0.0.5".to_string(),
        username: "visor".to_string(),
        password: "ping".to_string(),
        last_connected: 0,
        is_connected: false,
    };
    let json = serde_json::to_value(&device).expect("json");
    assert_eq!(json["ipAddress"], "10.0.0.5");
    assert_eq!(json["isConnected"], false);

    let status = LogicStatusData::default();
    assert!(!status.is_logic_running);
}

#[test]
fn cs_inputs_offer_level_conditions_on_both_families() {
    for family in [DeviceFamily::NetPing, DeviceFamily::UniPing] {
        let labels: Vec<String> = family
            .capabilities()
            .condition_options(80)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["= log. 0", "= log. 1"]);
    }

    assert_eq!(DeviceFamily::UniPing.capabilities().describe_condition(80, 1), "= log. 1");
    assert_eq!(
        DeviceFamily::NetPing.capabilities().describe_condition(80, 1),
        "Unknown condition (1)"
    );
}
