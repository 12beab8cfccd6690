//! 写入目标、单次尝试结果与回读比对规则。

use crate::endpoint;
use crate::error::ClientError;
use domain::{LogicRule, PingerConfig, SetterConfig, ThermostatConfig, codes};
use netping_codec::{
    normalize_setter, pack_logic_rules, pack_pingers, pack_setters, pack_thermostats,
    prepare_pingers,
};

/// 保存成功的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 回读确认
    Verified,
    /// 设备以普通正文应答，未回读
    Accepted,
    /// 连接被切断或返回 HTML 后回读失败，按成功处理
    Assumed,
}

/// 单次提交的结果。
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
    Confirmed(SaveOutcome),
    /// 设备可能已接受写入，需要回读判定
    NeedsVerification,
    Failed(ClientError),
}

/// 一次写操作实际下发的记录。
///
/// 构造时完成截断、过滤与补齐，回读比对使用的就是下发内容。
#[derive(Debug, Clone)]
pub(crate) enum WriteTarget {
    LogicRules(Vec<LogicRule>),
    Thermostats(Vec<ThermostatConfig>),
    Pingers(Vec<PingerConfig>),
    Setters(Vec<SetterConfig>),
}

impl WriteTarget {
    pub(crate) fn logic_rules(rules: &[LogicRule]) -> Self {
        Self::LogicRules(rules.iter().take(codes::MAX_LOGIC_RULES).copied().collect())
    }

    pub(crate) fn thermostats(thermostats: &[ThermostatConfig]) -> Self {
        Self::Thermostats(thermostats.iter().take(codes::MAX_THERMOSTATS).copied().collect())
    }

    pub(crate) fn pingers(pingers: &[PingerConfig]) -> Self {
        Self::Pingers(prepare_pingers(pingers))
    }

    pub(crate) fn setters(setters: &[SetterConfig]) -> Self {
        Self::Setters(
            setters
                .iter()
                .take(codes::MAX_SETTERS)
                .map(normalize_setter)
                .collect(),
        )
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::LogicRules(_) => "logic",
            Self::Thermostats(_) => "tstat",
            Self::Pingers(_) => "pinger",
            Self::Setters(_) => "setter",
        }
    }

    pub(crate) fn set_path(&self) -> &'static str {
        match self {
            Self::LogicRules(_) => endpoint::LOGIC_SET,
            Self::Thermostats(_) => endpoint::TSTAT_SET,
            Self::Pingers(_) => endpoint::PINGER_SET,
            Self::Setters(_) => endpoint::SETTER_SET,
        }
    }

    /// 十六进制配置块。
    pub(crate) fn payload(&self) -> String {
        match self {
            Self::LogicRules(rules) => pack_logic_rules(rules),
            Self::Thermostats(thermostats) => pack_thermostats(thermostats),
            Self::Pingers(pingers) => pack_pingers(pingers),
            Self::Setters(setters) => pack_setters(setters),
        }
    }
}

/// 回读结果。
#[derive(Debug, Clone)]
pub(crate) enum ReadBack {
    LogicRules(Vec<LogicRule>),
    Thermostats(Vec<ThermostatConfig>),
    Pingers(Vec<PingerConfig>),
    Setters(Vec<SetterConfig>),
}

/// 任意一条下发记录与任意一条回读记录匹配即视为整批保存成功。
pub(crate) fn is_saved(target: &WriteTarget, read_back: &ReadBack) -> bool {
    match (target, read_back) {
        (WriteTarget::LogicRules(sent), ReadBack::LogicRules(current)) => {
            any_match(sent, current, logic_rule_matches)
        }
        (WriteTarget::Thermostats(sent), ReadBack::Thermostats(current)) => {
            any_match(sent, current, thermostat_matches)
        }
        (WriteTarget::Pingers(sent), ReadBack::Pingers(current)) => {
            any_match(sent, current, pinger_matches)
        }
        (WriteTarget::Setters(sent), ReadBack::Setters(current)) => {
            any_match(sent, current, setter_matches)
        }
        _ => false,
    }
}

fn any_match<T>(sent: &[T], current: &[T], matches: fn(&T, &T) -> bool) -> bool {
    sent.iter()
        .any(|expected| current.iter().any(|actual| matches(expected, actual)))
}

fn logic_rule_matches(expected: &LogicRule, actual: &LogicRule) -> bool {
    expected == actual
}

fn thermostat_matches(expected: &ThermostatConfig, actual: &ThermostatConfig) -> bool {
    expected.sensor_no == actual.sensor_no
        && expected.setpoint == actual.setpoint
        && expected.hyst == actual.hyst
}

fn pinger_matches(expected: &PingerConfig, actual: &PingerConfig) -> bool {
    expected.address.eq_ignore_ascii_case(&actual.address)
        && expected.period == actual.period
        && expected.timeout == actual.timeout
}

/// 名称、地址、端口任一相同即算匹配。
///
/// 这比其他记录宽松得多：一条无关的旧记录只要端口相同就会让保存被判定成功。
/// 保留该行为以兼容现有设备上的使用方式。
fn setter_matches(expected: &SetterConfig, actual: &SetterConfig) -> bool {
    expected.name.eq_ignore_ascii_case(&actual.name)
        || expected.address.eq_ignore_ascii_case(&actual.address)
        || expected.port == actual.port
}
