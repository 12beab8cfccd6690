//! logic_get.cgi：规则数组与逻辑引擎运行标志。

use crate::js_object::{field, parse_js_object, split_objects};
use crate::pattern::Pattern;
use domain::LogicRule;

static RULE_ARRAY: Pattern = Pattern::new(r"\bdata\s*=\s*\[([^\]]*)\]");
static LOGIC_FLAGS: Pattern = Pattern::new(r"\bdata_logic_flags\s*=\s*(\d+)");

/// 逻辑引擎运行位。
const RUNNING_BIT: u32 = 0x80;

pub fn parse_logic_rules(body: &str) -> Vec<LogicRule> {
    let Some(array) = RULE_ARRAY.capture(body) else {
        return Vec::new();
    };
    split_objects(array)
        .into_iter()
        .map(|fragment| {
            let object = parse_js_object(fragment);
            LogicRule {
                flags: field(&object, "flags").unwrap_or(0),
                input: field(&object, "input").unwrap_or(0),
                condition: field(&object, "condition").unwrap_or(0),
                action: field(&object, "action").unwrap_or(0),
                output: field(&object, "output").unwrap_or(0),
            }
        })
        .collect()
}

/// `data_logic_flags` 的 0x80 位。字段不存在时返回 `None`，调用方保留已有状态。
pub fn parse_logic_running(body: &str) -> Option<bool> {
    LOGIC_FLAGS
        .capture_parsed::<u32>(body)
        .map(|flags| flags & RUNNING_BIT != 0)
}
