//! 设备客户端。

use crate::LOG_TARGET;
use crate::clock::now_epoch_ms;
use crate::config::ClientConfig;
use crate::endpoint;
use crate::error::ClientError;
use crate::session::DeviceSession;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::write::{AttemptOutcome, ReadBack, SaveOutcome, WriteTarget, is_saved};
use domain::{
    DeviceCapabilities, DeviceFamily, DeviceInfo, DeviceSnapshot, LogicAction, LogicRule,
    LogicStatusData, PingerConfig, SetterConfig, ThermostatConfig, ThermostatSet,
};
use netping_codec::decode_hex;
use netping_parser::SetupData;
use netping_telemetry::{
    new_operation_id, record_form_fallback, record_poll_failure, record_request_failure,
    record_request_sent, record_status_poll, record_write_accepted, record_write_assumed,
    record_write_failed, record_write_latency_ms, record_write_verified,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};

/// 单台设备的客户端。
///
/// 所有设备 I/O 都经由注入的 [`HttpTransport`]；会话在 [`connect`](Self::connect)
/// 成功后建立，[`disconnect`](Self::disconnect) 时丢弃。
///
/// 每次会话结束（断开或被新会话替换）都会递增会话代数，
/// 订阅了 [`session_generation`](Self::session_generation) 的轮询任务据此退出。
pub struct DeviceClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    session: Option<DeviceSession>,
    generation: watch::Sender<u64>,
}

impl DeviceClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            session: None,
            generation: watch::Sender::new(0),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DeviceSession> {
        self.session.as_ref()
    }

    /// 订阅会话代数变化。
    pub fn session_generation(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// 当前设备系列的码表；未连接或尚未读取型号时按 NetPing。
    pub fn capabilities(&self) -> &'static DeviceCapabilities {
        self.session
            .as_ref()
            .map(DeviceSession::family)
            .unwrap_or_default()
            .capabilities()
    }

    /// 建立会话并做连接测试，测试不通过时不保留会话。
    pub async fn connect(
        &mut self,
        address: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.end_session();
        let session = DeviceSession::new(address, username, password);
        info!(target: LOG_TARGET, base_url = %session.base_url(), "connecting");
        self.session = Some(session);

        if self.test_connection().await? {
            info!(target: LOG_TARGET, address, "connected");
            Ok(())
        } else {
            self.session = None;
            warn!(target: LOG_TARGET, address, "device did not answer connection test");
            Err(ClientError::Unreachable(address.to_string()))
        }
    }

    /// 丢弃会话并通知轮询任务停止。
    pub fn disconnect(&mut self) {
        if let Some(session) = self.end_session() {
            info!(target: LOG_TARGET, address = session.address(), "disconnected");
        }
    }

    fn end_session(&mut self) -> Option<DeviceSession> {
        let session = self.session.take()?;
        self.generation.send_modify(|generation| *generation += 1);
        Some(session)
    }

    /// 仅判断身份接口是否返回 2xx，不检查正文。
    pub async fn test_connection(&self) -> Result<bool, ClientError> {
        match self.get(endpoint::DEVNAME).await {
            Ok(response) => Ok(response.is_success()),
            Err(ClientError::Transport(err)) => {
                debug!(target: LOG_TARGET, error = %err, "connection test failed");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// 全量读取。
    ///
    /// 身份、网络设置、逻辑规则、温控任一失败即整体失败；Pinger、Setter 与实时状态
    /// 读取失败时降级为空值。
    pub async fn fetch_snapshot(&mut self) -> Result<DeviceSnapshot, ClientError> {
        self.require_session()?;

        let mut info = self.fetch_identity().await?;
        let setup = self.fetch_setup().await?;
        let logic_rules = self.fetch_logic_rules().await?;
        let tstat = self.fetch_thermostats().await?;

        merge_setup(&mut info, &setup);
        let family = DeviceFamily::from_model(&info.model);
        self.require_session_mut()?.family = family;

        let pingers = self.fetch_pingers().await.unwrap_or_else(|err| {
            warn!(target: LOG_TARGET, error = %err, "pinger data unavailable");
            Vec::new()
        });
        let setters = self.fetch_setters().await.unwrap_or_else(|err| {
            warn!(target: LOG_TARGET, error = %err, "setter data unavailable");
            Vec::new()
        });
        let logic_status = self.fetch_logic_status().await?;

        info!(
            target: LOG_TARGET,
            model = %info.model,
            ?family,
            rules = logic_rules.len(),
            thermostats = tstat.thermostats.len(),
            "snapshot fetched"
        );

        Ok(DeviceSnapshot {
            family,
            info,
            network: setup.network,
            logic_rules,
            thermostats: tstat.thermostats,
            termo_channels: tstat.termo_channels,
            rh_channels: tstat.rh_channels,
            pingers,
            setters,
            logic_status,
        })
    }

    /// 仅状态读取。失败时降级为只含缓存运行标志的空状态；
    /// 运行标志总是取缓存值。
    pub async fn fetch_logic_status(&self) -> Result<LogicStatusData, ClientError> {
        let session = self.require_session()?;
        let running = session.logic_running;
        record_status_poll();

        let status = match self.get_ok(endpoint::LOGIC_STATUS).await {
            Ok(body) => {
                let mut status =
                    netping_parser::parse_logic_status(&body, session.thermostats(), now_epoch_ms());
                status.is_logic_running = running;
                status
            }
            Err(err) => {
                record_poll_failure();
                warn!(target: LOG_TARGET, error = %err, "logic status unavailable");
                let mut status = LogicStatusData::with_running(running);
                status.last_update_ms = now_epoch_ms();
                status
            }
        };
        Ok(status)
    }

    pub async fn save_logic_rules(&mut self, rules: &[LogicRule]) -> Result<SaveOutcome, ClientError> {
        self.save(WriteTarget::logic_rules(rules)).await
    }

    pub async fn save_thermostats(
        &mut self,
        thermostats: &[ThermostatConfig],
    ) -> Result<SaveOutcome, ClientError> {
        self.save(WriteTarget::thermostats(thermostats)).await
    }

    /// 只下发参数合法的 Pinger；全部不合法时下发两条空占位。
    pub async fn save_pingers(&mut self, pingers: &[PingerConfig]) -> Result<SaveOutcome, ClientError> {
        self.save(WriteTarget::pingers(pingers)).await
    }

    /// 空 OID、空 community、端口 0、value_on 0 在下发前补为默认值。
    pub async fn save_setters(&mut self, setters: &[SetterConfig]) -> Result<SaveOutcome, ClientError> {
        self.save(WriteTarget::setters(setters)).await
    }

    /// 逻辑引擎启停/复位，返回并缓存之后的运行状态。
    pub async fn control_logic(&mut self, action: LogicAction) -> Result<bool, ClientError> {
        let body = self.get_ok(&endpoint::logic_run_path(action)).await?;
        let running = match body.trim() {
            "1" => true,
            "0" => false,
            _ => action.implied_running(),
        };
        self.require_session_mut()?.logic_running = running;
        info!(target: LOG_TARGET, ?action, running, "logic control applied");
        Ok(running)
    }

    /// 触发第 `index` 个 Setter（从 0 开始）。
    pub async fn test_setter(&self, index: usize, turn_on: bool) -> Result<(), ClientError> {
        self.get_ok(&endpoint::setter_test_path(index, turn_on)).await?;
        info!(target: LOG_TARGET, index, turn_on, "setter test sent");
        Ok(())
    }

    // ---- 读取 ----

    async fn fetch_identity(&self) -> Result<DeviceInfo, ClientError> {
        let body = self.get_ok(endpoint::DEVNAME).await?;
        Ok(netping_parser::parse_identity(&body)?)
    }

    async fn fetch_setup(&self) -> Result<SetupData, ClientError> {
        let body = self.get_ok(endpoint::SETUP_GET).await?;
        Ok(netping_parser::parse_setup(&body)?)
    }

    /// 同时刷新缓存的运行标志（字段存在时）。
    async fn fetch_logic_rules(&mut self) -> Result<Vec<LogicRule>, ClientError> {
        let body = self.get_ok(endpoint::LOGIC_GET).await?;
        if let Some(running) = netping_parser::parse_logic_running(&body) {
            self.require_session_mut()?.logic_running = running;
        }
        Ok(netping_parser::parse_logic_rules(&body))
    }

    /// 同时记录温控配置，供状态文本计算阈值。
    async fn fetch_thermostats(&mut self) -> Result<ThermostatSet, ClientError> {
        let body = self.get_ok(endpoint::TSTAT_GET).await?;
        let set = netping_parser::parse_thermostats(&body);
        self.require_session_mut()?.thermostats = set.thermostats.clone();
        Ok(set)
    }

    async fn fetch_pingers(&self) -> Result<Vec<PingerConfig>, ClientError> {
        let body = self.get_ok(endpoint::PINGER_GET).await?;
        Ok(netping_parser::parse_pingers(&body))
    }

    async fn fetch_setters(&self) -> Result<Vec<SetterConfig>, ClientError> {
        let body = self.get_ok(endpoint::SETTER_GET).await?;
        Ok(netping_parser::parse_setters(&body))
    }

    async fn read_back(&mut self, target: &WriteTarget) -> Result<ReadBack, ClientError> {
        let read_back = match target {
            WriteTarget::LogicRules(_) => ReadBack::LogicRules(self.fetch_logic_rules().await?),
            WriteTarget::Thermostats(_) => {
                ReadBack::Thermostats(self.fetch_thermostats().await?.thermostats)
            }
            WriteTarget::Pingers(_) => ReadBack::Pingers(self.fetch_pingers().await?),
            WriteTarget::Setters(_) => ReadBack::Setters(self.fetch_setters().await?),
        };
        Ok(read_back)
    }

    // ---- 写入 ----

    async fn save(&mut self, target: WriteTarget) -> Result<SaveOutcome, ClientError> {
        self.require_session()?;
        let span = info_span!(
            target: LOG_TARGET,
            "save",
            op_id = %new_operation_id(),
            family = target.label()
        );
        let started = Instant::now();

        let result = self.run_write(&target).instrument(span.clone()).await;
        record_write_latency_ms(started.elapsed().as_millis() as u64);

        let _entered = span.enter();
        match &result {
            Ok(SaveOutcome::Verified) => record_write_verified(),
            Ok(SaveOutcome::Accepted) => record_write_accepted(),
            Ok(SaveOutcome::Assumed) => record_write_assumed(),
            Err(_) => record_write_failed(),
        }
        match &result {
            Ok(outcome) => info!(target: LOG_TARGET, ?outcome, "save finished"),
            Err(err) => warn!(target: LOG_TARGET, error = %err, "save failed"),
        }
        result
    }

    async fn run_write(&mut self, target: &WriteTarget) -> Result<SaveOutcome, ClientError> {
        let payload = target.payload();

        match self.attempt_form(target, &payload).await {
            AttemptOutcome::Confirmed(outcome) => return Ok(outcome),
            AttemptOutcome::NeedsVerification | AttemptOutcome::Failed(_) => {
                record_form_fallback();
            }
        }

        let bytes = decode_hex(&payload)?;
        match self.attempt_binary(target, bytes).await {
            AttemptOutcome::Confirmed(outcome) => Ok(outcome),
            AttemptOutcome::Failed(err) => Err(err),
            AttemptOutcome::NeedsVerification => {
                self.settle().await;
                match self.verify(target).await {
                    Ok(true) => Ok(SaveOutcome::Verified),
                    Ok(false) => Err(ClientError::NotSaved(target.label())),
                    Err(err) => {
                        warn!(
                            target: LOG_TARGET,
                            error = %err,
                            "read-back failed after ambiguous write, assuming success"
                        );
                        Ok(SaveOutcome::Assumed)
                    }
                }
            }
        }
    }

    /// 表单提交。只有回读确认时才算成功，其余情况交给二进制提交。
    async fn attempt_form(&mut self, target: &WriteTarget, payload: &str) -> AttemptOutcome {
        let request = match self.require_session() {
            Ok(session) => {
                endpoint::form_post(session, &self.config.user_agent, target.set_path(), payload)
            }
            Err(err) => return AttemptOutcome::Failed(err),
        };
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(target: LOG_TARGET, error = %err, "form post failed");
                return AttemptOutcome::Failed(err);
            }
        };
        if !response.is_success() {
            debug!(target: LOG_TARGET, status = response.status, "form post rejected");
            return AttemptOutcome::Failed(ClientError::http_status(response.status, &response.body));
        }
        if response.body.to_ascii_lowercase().contains("error") {
            debug!(target: LOG_TARGET, "form post answered with error body");
            return AttemptOutcome::Failed(ClientError::rejected(&response.body));
        }

        self.settle().await;
        match self.verify(target).await {
            Ok(true) => AttemptOutcome::Confirmed(SaveOutcome::Verified),
            Ok(false) => {
                debug!(target: LOG_TARGET, "form post not reflected in read-back");
                AttemptOutcome::Failed(ClientError::NotSaved(target.label()))
            }
            Err(err) => AttemptOutcome::Failed(err),
        }
    }

    /// 二进制提交。
    async fn attempt_binary(&self, target: &WriteTarget, bytes: Vec<u8>) -> AttemptOutcome {
        let request = match self.require_session() {
            Ok(session) => {
                endpoint::binary_post(session, &self.config.user_agent, target.set_path(), bytes)
            }
            Err(err) => return AttemptOutcome::Failed(err),
        };

        match self.send(request).await {
            Err(ClientError::Transport(err)) if err.is_connection_cut() => {
                info!(target: LOG_TARGET, error = %err, "connection cut after binary post");
                AttemptOutcome::NeedsVerification
            }
            Err(err) => AttemptOutcome::Failed(err),
            Ok(response) if !response.is_success() => {
                AttemptOutcome::Failed(ClientError::http_status(response.status, &response.body))
            }
            Ok(response) if looks_like_html(&response.body) => {
                info!(target: LOG_TARGET, "binary post answered with html page");
                AttemptOutcome::NeedsVerification
            }
            Ok(_) => AttemptOutcome::Confirmed(SaveOutcome::Accepted),
        }
    }

    async fn verify(&mut self, target: &WriteTarget) -> Result<bool, ClientError> {
        let read_back = self.read_back(target).await?;
        let saved = is_saved(target, &read_back);
        debug!(target: LOG_TARGET, saved, "read-back compared");
        Ok(saved)
    }

    async fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
    }

    // ---- 传输 ----

    fn require_session(&self) -> Result<&DeviceSession, ClientError> {
        self.session.as_ref().ok_or(ClientError::NotConnected)
    }

    fn require_session_mut(&mut self) -> Result<&mut DeviceSession, ClientError> {
        self.session.as_mut().ok_or(ClientError::NotConnected)
    }

    async fn get(&self, path: &str) -> Result<HttpResponse, ClientError> {
        let request = endpoint::get(self.require_session()?, &self.config.user_agent, path);
        self.send(request).await
    }

    /// GET 并要求 2xx，返回正文。
    async fn get_ok(&self, path: &str) -> Result<String, ClientError> {
        let response = self.get(path).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            warn!(target: LOG_TARGET, endpoint = %path, status = response.status, "request rejected");
            Err(ClientError::http_status(response.status, &response.body))
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(target: LOG_TARGET, method = %request.method, url = %request.url, "request");
        record_request_sent();
        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(target: LOG_TARGET, status = response.status, "response");
                Ok(response)
            }
            Err(err) => {
                record_request_failure();
                Err(ClientError::Transport(err))
            }
        }
    }
}

/// 用 setup 数据补全身份信息。
fn merge_setup(info: &mut DeviceInfo, setup: &SetupData) {
    info.serial_number = setup.serial_number.clone();
    info.contact = setup.contact.clone();
    info.uptime = setup.uptime.clone();
    if info.hostname.is_empty() {
        info.hostname = setup.hostname.clone();
    }
    if info.location.is_empty() {
        info.location = setup.location.clone();
    }
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("<html") || lower.contains("<!doctype")
}
