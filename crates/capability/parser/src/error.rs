//! 解析错误类型定义

/// 主接口解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// devname_menu.cgi 中找不到任何身份变量
    #[error("device identity not found in response")]
    MissingIdentity,

    /// setup_get.cgi 中找不到 data={...} 对象
    #[error("setup data object not found in response")]
    MissingSetupObject,
}
