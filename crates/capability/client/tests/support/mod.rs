#![allow(dead_code)]

use async_trait::async_trait;
use domain::LogicRule;
use netping_client::{
    ClientConfig, DeviceClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody,
    TransportError, TransportErrorKind,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ADDRESS: &str = "10.0.0.5";
pub const BASE_URL: &str = "http://10.0.0.5";

pub const DEVNAME_BODY: &str = "var devname='NetPing 2/PWR-220 v3/ETH';\nvar fwver='v52.10.15.A-1';\nvar hwver=9;\nvar sys_name=\"rack-7\";\nvar sys_location=\"Server room\";\n";
pub const UNIPING_DEVNAME_BODY: &str = "var devname='UniPing server solution v3/SMS';\nvar fwver='v70.4.1';\nvar hwver=4;\n";
pub const SETUP_BODY: &str = "var data={serial:'A1B2C3',contact:'ops@example.org',ip:'10.0.0.5',mac:'00:A2:5A:01:02:03',mask:'255.255.255.0',gate:'10.0.0.1',hostname:'np-rack7',location:'Moscow'};\nvar uptime_100ms=864000;\n";
pub const LOGIC_BODY: &str = "var data_logic_flags=128;\nvar data=[{flags:1,input:16,condition:1,action:1,output:176},{flags:3,input:48,condition:0,action:2,output:177}];\n";
pub const TSTAT_BODY: &str = "var termo_n_ch=4;\nvar rh_n_ch=1;\nvar tstat_data=[{sensor_no:0,setpoint:25,hyst:2},{sensor_no:1,setpoint:30,hyst:1}];\n";
pub const PINGER_BODY: &str = "var pinger_data=[{hostname:'ya.ru',period:30,timeout:1000},{ip:'8.8.8.8',period:60,timeout:500}];\n";
pub const SETTER_BODY: &str = "var setter_data=[{name:'fan',ip:'10.0.0.9',port:161,oid:'1.3.6.1.4.1.25728.8200.1.1.2.1.1',community:'public',value_on:1,value_off:0}];\n";
pub const STATUS_BODY: &str = "var data_logic_flags=0;\nvar tstat_status=[{t_status:0,t_val:21.5},{t_status:254,t_val:0}];\nvar pinger_status=[1,0];\nvar setter_status=[0,255];\n";

pub type Reply = Result<HttpResponse, TransportError>;

/// 按 (方法, 路径) 预置应答的传输实现。
///
/// 同一路径的应答按顺序消费，最后一个应答会被重复使用。
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: HttpMethod, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn on_get(&self, path: &str, status: u16, body: &str) {
        self.on(HttpMethod::Get, path, Ok(HttpResponse::new(status, body)));
    }

    pub fn on_post(&self, path: &str, status: u16, body: &str) {
        self.on(HttpMethod::Post, path, Ok(HttpResponse::new(status, body)));
    }

    /// 覆盖该路径已有的全部应答。
    pub fn replace_get(&self, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            (HttpMethod::Get, path.to_string()),
            VecDeque::from([Ok(HttpResponse::new(status, body))]),
        );
    }

    pub fn fail(&self, method: HttpMethod, path: &str, kind: TransportErrorKind, message: &str) {
        self.on(method, path, Err(TransportError::new(kind, message)));
    }

    /// 预置一台完整设备的所有读接口。
    pub fn script_device(&self) {
        self.on_get("/devname_menu.cgi", 200, DEVNAME_BODY);
        self.on_get("/setup_get.cgi", 200, SETUP_BODY);
        self.on_get("/logic_get.cgi", 200, LOGIC_BODY);
        self.on_get("/tstat_get.cgi", 200, TSTAT_BODY);
        self.on_get("/pinger_get.cgi", 200, PINGER_BODY);
        self.on_get("/setter_get.cgi", 200, SETTER_BODY);
        self.on_get("/logic_status.cgi", 200, STATUS_BODY);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        let url = format!("{}{}", BASE_URL, path);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }

    pub fn posts(&self, path: &str) -> Vec<HttpRequest> {
        let url = format!("{}{}", BASE_URL, path);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == HttpMethod::Post && request.url == url)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let key = (request.method, path.clone());
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(TransportError::new(
                TransportErrorKind::Connect,
                format!("no script for {} {}", key.0, path),
            )),
        }
    }
}

/// 模拟设备逻辑规则存储：接收 128 字节规则块，按 JS 文本回显。
#[derive(Default)]
pub struct SimulatedLogicDevice {
    blocks: Mutex<Vec<u8>>,
}

impl SimulatedLogicDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn echo(&self) -> String {
        let blocks = self.blocks.lock().unwrap();
        let objects: Vec<String> = blocks
            .chunks(16)
            .map(|block| {
                format!(
                    "{{flags:{},input:{},condition:{},action:{},output:{}}}",
                    block[0], block[1], block[2], block[3], block[4]
                )
            })
            .collect();
        format!("var data_logic_flags=128;\nvar data=[{}];\n", objects.join(",\n"))
    }
}

#[async_trait]
impl HttpTransport for SimulatedLogicDevice {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url);
        match (request.method, path) {
            (HttpMethod::Get, "/devname_menu.cgi") => Ok(HttpResponse::new(200, DEVNAME_BODY)),
            (HttpMethod::Get, "/setup_get.cgi") => Ok(HttpResponse::new(200, SETUP_BODY)),
            (HttpMethod::Get, "/tstat_get.cgi") => Ok(HttpResponse::new(200, TSTAT_BODY)),
            (HttpMethod::Get, "/logic_status.cgi") => Ok(HttpResponse::new(200, STATUS_BODY)),
            (HttpMethod::Get, "/logic_get.cgi") => Ok(HttpResponse::new(200, self.echo())),
            (HttpMethod::Post, "/logic_set.cgi") => {
                let RequestBody::Form(fields) = &request.body else {
                    return Ok(HttpResponse::new(400, "expected form"));
                };
                let hex = &fields[0].1;
                *self.blocks.lock().unwrap() = netping_codec::decode_hex(hex).unwrap();
                Ok(HttpResponse::new(200, "OK"))
            }
            _ => Ok(HttpResponse::new(404, "not found")),
        }
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        settle_delay: Duration::ZERO,
        ..ClientConfig::default()
    }
}

pub async fn connected_client(transport: Arc<dyn HttpTransport>) -> DeviceClient {
    let mut client = DeviceClient::new(transport, test_config());
    client
        .connect(ADDRESS, "visor", "ping")
        .await
        .expect("connect");
    client
}

pub fn form_data(request: &HttpRequest) -> String {
    match &request.body {
        RequestBody::Form(fields) => fields
            .iter()
            .find(|(key, _)| key == "data")
            .map(|(_, value)| value.clone())
            .expect("data field"),
        other => panic!("expected form body, got {:?}", other),
    }
}

pub fn rule(flags: u8, input: u8, condition: u8, action: u8, output: u8) -> LogicRule {
    LogicRule::new(flags, input, condition, action, output)
}
