//! 逻辑规则块。
//!
//! 每条规则占 16 字节：flags@0、input@1、condition@2、action@3、output@4，
//! 其余 11 字节保留为零。规则按下标落位，校验未通过的规则整块留零，
//! 不影响其他规则。

use crate::layout::encode_hex;
use domain::{LogicRule, codes};
use tracing::debug;

pub const LOGIC_BLOCK_SIZE: usize = 16;
pub const LOGIC_PAYLOAD_SIZE: usize = LOGIC_BLOCK_SIZE * codes::MAX_LOGIC_RULES;

const FLAGS_OFFSET: usize = 0;
const INPUT_OFFSET: usize = 1;
const CONDITION_OFFSET: usize = 2;
const ACTION_OFFSET: usize = 3;
const OUTPUT_OFFSET: usize = 4;

/// 规则被拒绝下发的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRejection {
    /// RESET 输入不能配合"切换"动作。
    ResetToggle,
    /// 红外输出：触发型只能"开"，电平型只能"关"。
    IrAction,
    /// CS 电源类输出只允许触发型规则。
    CsPowerLevel,
    /// 烟雾复位输出只允许触发型 + "开"。
    SmokeResetAction,
}

impl std::fmt::Display for RuleRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::ResetToggle => "reset input cannot toggle",
            Self::IrAction => "ir output requires trigger+on or level+off",
            Self::CsPowerLevel => "cs power output requires trigger rule",
            Self::SmokeResetAction => "smoke reset output requires trigger+on",
        };
        f.write_str(text)
    }
}

/// 校验一条规则。未启用的规则总是通过。
pub fn validate_logic_rule(rule: &LogicRule) -> Result<(), RuleRejection> {
    if !rule.is_enabled() {
        return Ok(());
    }
    let trigger = rule.is_trigger();

    if rule.input == codes::INPUT_RESET && rule.action == codes::ACTION_TOGGLE {
        return Err(RuleRejection::ResetToggle);
    }

    let family = rule.output & codes::OUTPUT_FAMILY_MASK;
    if family == codes::OUTPUT_FAMILY_IR {
        let allowed = (trigger && rule.action == codes::ACTION_ON)
            || (!trigger && rule.action == codes::ACTION_OFF);
        if !allowed {
            return Err(RuleRejection::IrAction);
        }
    }
    if family == codes::OUTPUT_FAMILY_CS && !trigger {
        return Err(RuleRejection::CsPowerLevel);
    }
    if rule.output == codes::OUTPUT_SMOKE_RESET && !(trigger && rule.action == codes::ACTION_ON) {
        return Err(RuleRejection::SmokeResetAction);
    }
    Ok(())
}

/// 构造 128 字节规则块。超过 8 条的部分被丢弃。
pub fn build_logic_payload(rules: &[LogicRule]) -> Vec<u8> {
    let mut buffer = vec![0u8; LOGIC_PAYLOAD_SIZE];

    for (index, rule) in rules.iter().take(codes::MAX_LOGIC_RULES).enumerate() {
        if let Err(reason) = validate_logic_rule(rule) {
            debug!(index, %reason, "logic rule skipped");
            continue;
        }
        let base = index * LOGIC_BLOCK_SIZE;
        buffer[base + FLAGS_OFFSET] = rule.flags;
        buffer[base + INPUT_OFFSET] = rule.input;
        buffer[base + CONDITION_OFFSET] = rule.condition;
        buffer[base + ACTION_OFFSET] = rule.action;
        buffer[base + OUTPUT_OFFSET] = rule.output;
    }

    buffer
}

pub fn pack_logic_rules(rules: &[LogicRule]) -> String {
    encode_hex(&build_logic_payload(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_rule_bypasses_validation() {
        let rule = LogicRule::new(0x00, codes::INPUT_RESET, 0, codes::ACTION_TOGGLE, 176);
        assert_eq!(validate_logic_rule(&rule), Ok(()));
    }

    #[test]
    fn rejection_reasons() {
        let reset_toggle = LogicRule::new(0x03, 1, 0, 2, 176);
        assert_eq!(validate_logic_rule(&reset_toggle), Err(RuleRejection::ResetToggle));

        let ir_level_on = LogicRule::new(0x01, 16, 1, 1, 208);
        assert_eq!(validate_logic_rule(&ir_level_on), Err(RuleRejection::IrAction));
        let ir_level_off = LogicRule::new(0x01, 16, 1, 0, 208);
        assert_eq!(validate_logic_rule(&ir_level_off), Ok(()));
        let ir_trigger_on = LogicRule::new(0x03, 16, 1, 1, 209);
        assert_eq!(validate_logic_rule(&ir_trigger_on), Ok(()));

        let snmp_level = LogicRule::new(0x01, 16, 1, 1, 192);
        assert_eq!(validate_logic_rule(&snmp_level), Err(RuleRejection::CsPowerLevel));

        let smoke_toggle = LogicRule::new(0x03, 112, 1, 2, 240);
        assert_eq!(validate_logic_rule(&smoke_toggle), Err(RuleRejection::SmokeResetAction));
        let smoke_on = LogicRule::new(0x03, 112, 1, 1, 240);
        assert_eq!(validate_logic_rule(&smoke_on), Ok(()));
    }
}
