//! Pod display status
//!
//! Reproduces the STATUS and RESTARTS columns of `kubectl get pods`:
//! init containers are walked in order until the first one that has not
//! completed, then (once the pod is initialized) main containers are folded
//! in reverse so the first declared container has the final say.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{
    Container, ContainerStateTerminated, ContainerStatus, Pod, PodCondition,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

use super::age::{human_duration, to_utc};

const UNKNOWN: &str = "Unknown";
const NODE_LOST: &str = "NodeLost";
const SCHEDULING_GATED: &str = "SchedulingGated";
const POD_INITIALIZING: &str = "PodInitializing";
const RESTART_POLICY_ALWAYS: &str = "Always";

/// Restart count of a pod and the time of its most recent restart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestartSummary {
    pub count: i32,
    pub last_restart: Option<Time>,
}

impl RestartSummary {
    /// Render as kubectl does: `3`, or `3 (5m ago)` when the last restart is known
    pub fn display(&self, now: DateTime<Utc>) -> String {
        match self.last_restart.as_ref().and_then(to_utc) {
            Some(at) => format!("{} ({} ago)", self.count, human_duration(now - at)),
            None => self.count.to_string(),
        }
    }
}

/// Derive the display status of a pod
///
/// Never fails: a pod without status or phase is "Unknown".
pub fn resolve_status(pod: &Pod) -> String {
    evaluate(pod).reason
}

/// Derive the restart count shown next to the status
///
/// While the pod is still initializing this counts init container restarts;
/// afterwards it counts main containers plus restartable (sidecar) init
/// containers.
pub fn resolve_restarts(pod: &Pod) -> RestartSummary {
    evaluate(pod).restarts
}

/// Find the most relevant error message among the pod's containers
///
/// Returns `None` when container statuses are missing or nothing looks
/// wrong, and an empty string for running/succeeded pods.
pub fn resolve_error_message(pod: &Pod) -> Option<String> {
    let status = pod.status.as_ref()?;
    let containers = status.container_statuses.as_ref()?;

    if matches!(status.phase.as_deref(), Some("Running" | "Succeeded")) || containers.is_empty() {
        return Some(String::new());
    }

    containers.iter().find_map(|container| {
        let state = container.state.as_ref()?;

        if let Some(message) = state
            .waiting
            .as_ref()
            .and_then(|w| non_empty(w.message.as_deref()))
        {
            return Some(message.to_string());
        }

        let terminated = state.terminated.as_ref()?;
        if let Some(message) = non_empty(terminated.message.as_deref()) {
            return Some(message.to_string());
        }
        match terminated.signal {
            Some(signal) if signal != 0 => Some(format!("Signal: {}", signal)),
            _ if terminated.exit_code != 0 => Some(format!("ExitCode: {}", terminated.exit_code)),
            _ => None,
        }
    })
}

/// Outcome of a full pass over a pod
struct PodDisplay {
    reason: String,
    restarts: RestartSummary,
}

/// State carried through the init container pass
#[derive(Default)]
struct InitScan {
    blocked: Option<String>,
    restarts: i32,
    last_restart: Option<Time>,
    restartable_restarts: i32,
    restartable_last_restart: Option<Time>,
}

/// Accumulator for the reverse fold over main containers
struct MainScan {
    reason: String,
    has_running: bool,
    restarts: i32,
    last_restart: Option<Time>,
}

impl MainScan {
    fn observe(mut self, container: &ContainerStatus) -> Self {
        self.restarts = self.restarts.saturating_add(container.restart_count);
        if let Some(finished) = last_finished_at(container) {
            self.last_restart = latest(self.last_restart, finished);
        }

        let state = container.state.as_ref();
        let waiting_reason = state
            .and_then(|s| s.waiting.as_ref())
            .and_then(|w| non_empty(w.reason.as_deref()));
        let terminated = state.and_then(|s| s.terminated.as_ref());

        if let Some(reason) = waiting_reason {
            self.reason = reason.to_string();
        } else if let Some(terminated) = terminated {
            self.reason = termination_label(terminated);
        } else if container.ready && state.is_some_and(|s| s.running.is_some()) {
            self.has_running = true;
        }
        self
    }
}

fn evaluate(pod: &Pod) -> PodDisplay {
    let Some(status) = pod.status.as_ref() else {
        return PodDisplay::unknown();
    };
    let Some(phase) = non_empty(status.phase.as_deref()) else {
        return PodDisplay::unknown();
    };

    let mut reason = phase.to_string();
    if let Some(status_reason) = non_empty(status.reason.as_deref()) {
        reason = status_reason.to_string();
    }

    let conditions: &[PodCondition] = status.conditions.as_deref().unwrap_or_default();
    if conditions
        .iter()
        .any(|c| c.type_ == "PodScheduled" && c.reason.as_deref() == Some(SCHEDULING_GATED))
    {
        reason = SCHEDULING_GATED.to_string();
    }

    let init_containers: &[Container] = pod
        .spec
        .as_ref()
        .and_then(|s| s.init_containers.as_deref())
        .unwrap_or_default();
    let init_statuses: &[ContainerStatus] =
        status.init_container_statuses.as_deref().unwrap_or_default();

    let init = scan_init_containers(init_containers, init_statuses);
    let initializing = init.blocked.is_some();
    if let Some(blocked) = &init.blocked {
        reason = blocked.clone();
    }

    let mut restarts = RestartSummary {
        count: init.restarts,
        last_restart: init.last_restart.clone(),
    };

    let pod_initialized = conditions
        .iter()
        .any(|c| c.type_ == "Initialized" && c.status == "True");

    if !initializing || pod_initialized {
        let seed = MainScan {
            reason,
            has_running: false,
            restarts: init.restartable_restarts,
            last_restart: init.restartable_last_restart,
        };
        let scan = status
            .container_statuses
            .as_deref()
            .unwrap_or_default()
            .iter()
            .rev()
            .fold(seed, MainScan::observe);

        reason = scan.reason;
        if reason == "Completed" && scan.has_running {
            reason = if conditions.iter().any(|c| c.type_ == "Ready") {
                "Running".to_string()
            } else {
                "NotReady".to_string()
            };
        }
        restarts = RestartSummary {
            count: scan.restarts,
            last_restart: scan.last_restart,
        };
    }

    if pod.metadata.deletion_timestamp.is_some() {
        if status.reason.as_deref() == Some(NODE_LOST) {
            reason = UNKNOWN.to_string();
        } else if !matches!(phase, "Failed" | "Succeeded") {
            reason = "Terminating".to_string();
        }
    }

    PodDisplay { reason, restarts }
}

/// Walk init containers in order, stopping at the first that blocks the pod
///
/// The `M` of `Init:N/M` is the number of init containers declared in the
/// pod spec, as kubectl prints it, even when statuses report more.
fn scan_init_containers(specs: &[Container], statuses: &[ContainerStatus]) -> InitScan {
    let by_name: HashMap<&str, &Container> = specs.iter().map(|c| (c.name.as_str(), c)).collect();
    let total = specs.len();

    let mut scan = InitScan::default();
    for (index, container) in statuses.iter().enumerate() {
        let restartable = by_name
            .get(container.name.as_str())
            .is_some_and(|c| c.restart_policy.as_deref() == Some(RESTART_POLICY_ALWAYS));

        scan.restarts = scan.restarts.saturating_add(container.restart_count);
        if restartable {
            scan.restartable_restarts =
                scan.restartable_restarts.saturating_add(container.restart_count);
        }
        if let Some(finished) = last_finished_at(container) {
            scan.last_restart = latest(scan.last_restart, finished);
            if restartable {
                scan.restartable_last_restart = latest(scan.restartable_last_restart, finished);
            }
        }

        let state = container.state.as_ref();
        let terminated = state.and_then(|s| s.terminated.as_ref());

        if terminated.is_some_and(|t| t.exit_code == 0) {
            continue;
        }
        if restartable && container.started == Some(true) {
            continue;
        }

        let waiting_reason = state
            .and_then(|s| s.waiting.as_ref())
            .and_then(|w| non_empty(w.reason.as_deref()))
            .filter(|r| *r != POD_INITIALIZING);

        scan.blocked = Some(match (terminated, waiting_reason) {
            (Some(terminated), _) => format!("Init:{}", termination_label(terminated)),
            (None, Some(waiting)) => format!("Init:{}", waiting),
            (None, None) => format!("Init:{}/{}", index, total),
        });
        break;
    }
    scan
}

/// Terminated reason, or the signal/exit code when the runtime gave none
fn termination_label(terminated: &ContainerStateTerminated) -> String {
    if let Some(reason) = non_empty(terminated.reason.as_deref()) {
        return reason.to_string();
    }
    match terminated.signal {
        Some(signal) if signal != 0 => format!("Signal:{}", signal),
        _ => format!("ExitCode:{}", terminated.exit_code),
    }
}

fn last_finished_at(container: &ContainerStatus) -> Option<&Time> {
    container
        .last_state
        .as_ref()?
        .terminated
        .as_ref()?
        .finished_at
        .as_ref()
}

fn latest(current: Option<Time>, candidate: &Time) -> Option<Time> {
    match current {
        Some(current) if current >= *candidate => Some(current),
        _ => Some(candidate.clone()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl PodDisplay {
    fn unknown() -> Self {
        Self {
            reason: UNKNOWN.to_string(),
            restarts: RestartSummary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pod(value: serde_json::Value) -> Pod {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_termination_label_prefers_reason() {
        let terminated: ContainerStateTerminated =
            serde_json::from_value(json!({"exitCode": 1, "reason": "Error", "signal": 9})).unwrap();
        assert_eq!(termination_label(&terminated), "Error");
    }

    #[test]
    fn test_termination_label_signal_then_exit_code() {
        let signalled: ContainerStateTerminated =
            serde_json::from_value(json!({"exitCode": 137, "signal": 9})).unwrap();
        assert_eq!(termination_label(&signalled), "Signal:9");

        let exited: ContainerStateTerminated =
            serde_json::from_value(json!({"exitCode": 2, "signal": 0})).unwrap();
        assert_eq!(termination_label(&exited), "ExitCode:2");
    }

    #[test]
    fn test_empty_phase_is_unknown() {
        let p = pod(json!({"status": {"phase": ""}}));
        assert_eq!(resolve_status(&p), "Unknown");
    }

    #[test]
    fn test_waiting_pod_initializing_reports_progress() {
        let p = pod(json!({
            "spec": {
                "containers": [{"name": "app"}],
                "initContainers": [{"name": "a"}, {"name": "b"}]
            },
            "status": {
                "phase": "Pending",
                "initContainerStatuses": [
                    {"name": "a", "ready": true, "restartCount": 0, "image": "i", "imageID": "",
                     "state": {"terminated": {"exitCode": 0}}},
                    {"name": "b", "ready": false, "restartCount": 0, "image": "i", "imageID": "",
                     "state": {"waiting": {"reason": "PodInitializing"}}}
                ]
            }
        }));
        assert_eq!(resolve_status(&p), "Init:1/2");
    }

    #[test]
    fn test_init_total_counts_declared_containers() {
        let status: ContainerStatus = serde_json::from_value(json!({
            "name": "a", "ready": false, "restartCount": 0, "image": "i", "imageID": "",
            "state": {"running": {}}
        }))
        .unwrap();
        assert_eq!(
            scan_init_containers(&[], std::slice::from_ref(&status)).blocked.as_deref(),
            Some("Init:0/0")
        );
    }

    #[test]
    fn test_latest_keeps_newest() {
        let older: Time = serde_json::from_value(json!("2024-01-01T00:00:00Z")).unwrap();
        let newer: Time = serde_json::from_value(json!("2024-01-02T00:00:00Z")).unwrap();
        assert_eq!(latest(Some(newer.clone()), &older), Some(newer.clone()));
        assert_eq!(latest(Some(older), &newer), Some(newer.clone()));
        assert_eq!(latest(None, &newer), Some(newer));
    }
}
