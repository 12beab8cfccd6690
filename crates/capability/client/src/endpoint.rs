//! CGI 路径与请求构造。

use crate::session::DeviceSession;
use crate::transport::{HttpMethod, HttpRequest, RequestBody};
use domain::LogicAction;

pub(crate) const DEVNAME: &str = "/devname_menu.cgi";
pub(crate) const SETUP_GET: &str = "/setup_get.cgi";
pub(crate) const LOGIC_GET: &str = "/logic_get.cgi";
pub(crate) const LOGIC_STATUS: &str = "/logic_status.cgi";
pub(crate) const LOGIC_SET: &str = "/logic_set.cgi";
pub(crate) const LOGIC_RUN: &str = "/logic_run.cgi";
pub(crate) const TSTAT_GET: &str = "/tstat_get.cgi";
pub(crate) const TSTAT_SET: &str = "/tstat_set.cgi";
pub(crate) const PINGER_GET: &str = "/pinger_get.cgi";
pub(crate) const PINGER_SET: &str = "/pinger_set.cgi";
pub(crate) const SETTER_GET: &str = "/setter_get.cgi";
pub(crate) const SETTER_SET: &str = "/setter_set.cgi";
pub(crate) const SETTER_TEST: &str = "/setter_test.cgi";

/// 表单字段名。
pub(crate) const FORM_FIELD: &str = "data";

pub(crate) fn logic_run_path(action: LogicAction) -> String {
    format!("{}?{}", LOGIC_RUN, action.code())
}

/// `index` 从 0 开始，设备通道号从 1 开始。
pub(crate) fn setter_test_path(index: usize, turn_on: bool) -> String {
    format!("{}?ch{}={}", SETTER_TEST, index + 1, u8::from(turn_on))
}

pub(crate) fn get(session: &DeviceSession, user_agent: &str, path: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url: session.url(path),
        headers: base_headers(session, user_agent),
        body: RequestBody::Empty,
    }
}

pub(crate) fn form_post(
    session: &DeviceSession,
    user_agent: &str,
    path: &str,
    hex_payload: &str,
) -> HttpRequest {
    post(
        session,
        user_agent,
        path,
        RequestBody::Form(vec![(FORM_FIELD.to_string(), hex_payload.to_string())]),
    )
}

/// 二进制提交不带 Accept-Encoding。
pub(crate) fn binary_post(
    session: &DeviceSession,
    user_agent: &str,
    path: &str,
    payload: Vec<u8>,
) -> HttpRequest {
    let mut request = post(session, user_agent, path, RequestBody::Binary(payload));
    request
        .headers
        .retain(|(name, _)| !name.eq_ignore_ascii_case("Accept-Encoding"));
    request
}

/// POST 额外关闭缓存与 keep-alive，并清空 Expect（设备不支持 100-continue）。
fn post(session: &DeviceSession, user_agent: &str, path: &str, body: RequestBody) -> HttpRequest {
    let mut headers = base_headers(session, user_agent);
    headers.extend(
        [
            ("Cache-Control", "no-cache"),
            ("Pragma", "no-cache"),
            ("Connection", "close"),
            ("Expect", ""),
        ]
        .map(|(name, value)| (name.to_string(), value.to_string())),
    );
    HttpRequest {
        method: HttpMethod::Post,
        url: session.url(path),
        headers,
        body,
    }
}

/// 设备短连接不能可靠处理压缩，始终要求 identity 编码。
fn base_headers(session: &DeviceSession, user_agent: &str) -> Vec<(String, String)> {
    vec![
        ("Authorization".to_string(), session.authorization().to_string()),
        ("Accept-Encoding".to_string(), "identity".to_string()),
        ("User-Agent".to_string(), user_agent.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_paths() {
        assert_eq!(logic_run_path(LogicAction::Stop), "/logic_run.cgi?0");
        assert_eq!(logic_run_path(LogicAction::Reset), "/logic_run.cgi?2");
        assert_eq!(setter_test_path(0, true), "/setter_test.cgi?ch1=1");
        assert_eq!(setter_test_path(1, false), "/setter_test.cgi?ch2=0");
    }

    #[test]
    fn post_headers_disable_caching() {
        let session = DeviceSession::new("10.0.0.5", "visor", "ping");
        let request = form_post(&session, "ua", TSTAT_SET, "00ff");
        assert_eq!(request.header("authorization"), Some("Basic dmlzb3I6cGluZw=="));
        assert_eq!(request.header("Accept-Encoding"), Some("identity"));
        assert_eq!(request.header("Connection"), Some("close"));
        assert_eq!(request.header("Expect"), Some(""));
        assert_eq!(
            request.body,
            RequestBody::Form(vec![("data".to_string(), "00ff".to_string())])
        );

        let request = binary_post(&session, "ua", TSTAT_SET, vec![0, 255]);
        assert_eq!(request.header("Accept-Encoding"), None);
        assert_eq!(request.header("Connection"), Some("close"));
        assert_eq!(request.body, RequestBody::Binary(vec![0, 255]));

        let request = get(&session, "ua", DEVNAME);
        assert_eq!(request.header("Pragma"), None);
        assert_eq!(request.url, "http://10.0.0.5/devname_menu.cgi");
    }
}
