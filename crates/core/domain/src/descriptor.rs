//! 协议码描述表。
//!
//! NetPing 与 UniPing 的输入/输出码表不同。会话建立后根据设备型号字符串
//! 选定一次 [`DeviceFamily`]，之后所有显示逻辑都通过 [`DeviceCapabilities`] 查表，
//! 不在各处分散判断型号。

use serde::{Deserialize, Serialize};

/// 设备系列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFamily {
    #[default]
    NetPing,
    UniPing,
}

impl DeviceFamily {
    /// 型号字符串包含 "UniPing"（不区分大小写）即为 UniPing。
    pub fn from_model(model: &str) -> Self {
        if model.to_ascii_lowercase().contains("uniping") {
            Self::UniPing
        } else {
            Self::NetPing
        }
    }

    pub fn capabilities(self) -> &'static DeviceCapabilities {
        match self {
            Self::NetPing => &NETPING,
            Self::UniPing => &UNIPING,
        }
    }
}

/// 下拉选项：协议码 + 显示文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub code: u32,
    pub label: String,
}

impl OptionEntry {
    fn new(code: u32, label: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
        }
    }
}

type CodeTable = &'static [(u8, &'static str)];

const COMMON_INPUTS: CodeTable = &[
    (1, "RESET"),
    (16, "IO 1"),
    (17, "IO 2"),
    (18, "IO 3"),
    (19, "IO 4"),
    (32, "TSTAT 1"),
    (33, "TSTAT 2"),
    (48, "PINGER 1"),
    (49, "PINGER 2"),
];

const COMMON_OUTPUTS: CodeTable = &[
    (160, "IO 1"),
    (161, "IO 2"),
    (162, "IO 3"),
    (163, "IO 4"),
    (176, "RELAY 1"),
    (192, "SNMP 1"),
    (193, "SNMP 2"),
    (208, "IR 1"),
    (209, "IR 2"),
    (210, "IR 3"),
    (211, "IR 4"),
];

const TSTAT_INPUTS: &[u8] = &[32, 33];
const PINGER_INPUTS: &[u8] = &[48, 49];
const IO_INPUTS: &[u8] = &[1, 16, 17, 18, 19];
const CS_INPUTS: &[u8] = &[64, 80, 96];
const SMOKE_INPUTS: &[u8] = &[112, 113, 114, 115];
const AC_POWER_INPUT: u8 = 128;

const TSTAT_CONDITIONS_NETPING: CodeTable = &[(0, "below set T"), (1, "above set T")];
const TSTAT_CONDITIONS_UNIPING: CodeTable = &[(0, "below threshold"), (1, "above threshold")];
const PINGER_CONDITIONS: CodeTable = &[(0, "silent"), (1, "responds")];
const LEVEL_CONDITIONS: CodeTable = &[(0, "= log. 0"), (1, "= log. 1")];
const AC_POWER_CONDITIONS: CodeTable = &[(0, "absent"), (1, "present")];
const SMOKE_CONDITIONS: CodeTable = &[(0, "= normal"), (1, "= alarm"), (4, "= off"), (5, "= fault")];
const TRIGGER_ACTIONS: CodeTable = &[(0, "turn off"), (1, "turn on"), (2, "toggle")];
const LEVEL_ACTIONS: CodeTable = &[(0, "hold off"), (1, "hold on")];

/// 某一设备系列的码表。
#[derive(Debug)]
pub struct DeviceCapabilities {
    pub family: DeviceFamily,
    extra_inputs: CodeTable,
    extra_outputs: CodeTable,
}

static NETPING: DeviceCapabilities = DeviceCapabilities {
    family: DeviceFamily::NetPing,
    extra_inputs: &[(AC_POWER_INPUT, "AC PWR")],
    extra_outputs: &[(177, "RELAY 2")],
};

static UNIPING: DeviceCapabilities = DeviceCapabilities {
    family: DeviceFamily::UniPing,
    extra_inputs: &[
        (64, "CS ALARM"),
        (80, "CS FAIL"),
        (96, "CS NORM"),
        (112, "SMOKE 1"),
        (113, "SMOKE 2"),
        (114, "SMOKE 3"),
        (115, "SMOKE 4"),
    ],
    extra_outputs: &[(224, "CS PWR"), (240, "SMOKE RST")],
};

impl DeviceCapabilities {
    pub fn input_options(&self) -> Vec<OptionEntry> {
        table_options(COMMON_INPUTS, self.extra_inputs)
    }

    pub fn output_options(&self) -> Vec<OptionEntry> {
        table_options(COMMON_OUTPUTS, self.extra_outputs)
    }

    /// 规则类型：0 = While（电平型），1 = If（触发型）。
    pub fn rule_type_options(&self) -> Vec<OptionEntry> {
        vec![OptionEntry::new(0, "While"), OptionEntry::new(1, "If")]
    }

    pub fn action_options(&self, is_trigger: bool) -> Vec<OptionEntry> {
        action_table(is_trigger)
            .iter()
            .map(|(code, label)| OptionEntry::new(u32::from(*code), *label))
            .collect()
    }

    /// CS 输入在两个系列下都提供电平条件，描述文本只对 UniPing 给出。
    pub fn condition_options(&self, input: u8) -> Vec<OptionEntry> {
        let table = self
            .condition_table(input)
            .or_else(|| CS_INPUTS.contains(&input).then_some(LEVEL_CONDITIONS));
        match table {
            Some(table) => table
                .iter()
                .map(|(code, label)| OptionEntry::new(u32::from(*code), *label))
                .collect(),
            None => vec![
                OptionEntry::new(0, "Condition 0"),
                OptionEntry::new(1, "Condition 1"),
            ],
        }
    }

    /// 温控可选传感器。
    ///
    /// UniPing：温度通道 0..termo，之后每个湿度传感器占两个槽位
    /// （`termo + 2j` 为湿度，`termo + 2j + 1` 为其温度）。
    /// NetPing：温度通道 0..termo，最后一个槽位 `termo` 为相对湿度。
    pub fn sensor_options(&self, termo_channels: u32, rh_channels: u32) -> Vec<OptionEntry> {
        let mut options = Vec::new();
        match self.family {
            DeviceFamily::UniPing => {
                for j in 0..termo_channels {
                    options.push(OptionEntry::new(j, format!("Temp. sensor {}", j + 1)));
                }
                for j in 0..rh_channels {
                    options.push(OptionEntry::new(
                        termo_channels + j * 2,
                        format!("RH sensor {} - humidity", j + 1),
                    ));
                }
                for j in 0..rh_channels {
                    options.push(OptionEntry::new(
                        termo_channels + j * 2 + 1,
                        format!("RH sensor {} - temp.", j + 1),
                    ));
                }
            }
            DeviceFamily::NetPing => {
                for j in 0..termo_channels {
                    options.push(OptionEntry::new(j, format!("{}", j + 1)));
                }
                options.push(OptionEntry::new(termo_channels, "Rel. humidity"));
            }
        }
        options
    }

    pub fn describe_input(&self, input: u8) -> String {
        find_label(COMMON_INPUTS, self.extra_inputs, input)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown input ({})", input))
    }

    pub fn describe_output(&self, output: u8) -> String {
        find_label(COMMON_OUTPUTS, self.extra_outputs, output)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown output ({})", output))
    }

    pub fn describe_condition(&self, input: u8, condition: u8) -> String {
        self.condition_table(input)
            .and_then(|table| table.iter().find(|(code, _)| *code == condition))
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| format!("Unknown condition ({})", condition))
    }

    pub fn describe_action(&self, is_trigger: bool, action: u8) -> String {
        action_table(is_trigger)
            .iter()
            .find(|(code, _)| *code == action)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| format!("Unknown action ({})", action))
    }

    fn condition_table(&self, input: u8) -> Option<CodeTable> {
        let uniping = self.family == DeviceFamily::UniPing;
        let table = if TSTAT_INPUTS.contains(&input) {
            if uniping { TSTAT_CONDITIONS_UNIPING } else { TSTAT_CONDITIONS_NETPING }
        } else if PINGER_INPUTS.contains(&input) {
            PINGER_CONDITIONS
        } else if IO_INPUTS.contains(&input) || (uniping && CS_INPUTS.contains(&input)) {
            LEVEL_CONDITIONS
        } else if input == AC_POWER_INPUT && !uniping {
            AC_POWER_CONDITIONS
        } else if uniping && SMOKE_INPUTS.contains(&input) {
            SMOKE_CONDITIONS
        } else {
            return None;
        };
        Some(table)
    }
}

fn action_table(is_trigger: bool) -> CodeTable {
    if is_trigger { TRIGGER_ACTIONS } else { LEVEL_ACTIONS }
}

fn table_options(common: CodeTable, extra: CodeTable) -> Vec<OptionEntry> {
    common
        .iter()
        .chain(extra.iter())
        .map(|(code, label)| OptionEntry::new(u32::from(*code), *label))
        .collect()
}

fn find_label(common: CodeTable, extra: CodeTable, code: u8) -> Option<&'static str> {
    common
        .iter()
        .chain(extra.iter())
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}
