//! In-memory store and scripted generator for engine tests

use crate::campaign::{Plan, PlanProperties, Session, SessionProperties};
use crate::error::{GeneratorError, StoreError};
use crate::generator::{ContentGenerator, ExecutionRequest, ExecutionResult};
use crate::store::{ContentObject, CreateObject, ObjectType, Query, RecordStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub const PLAN_TYPE_ID: &str = "type-plan";
pub const SESSION_TYPE_ID: &str = "type-session";

pub fn plan_fixture(id: &str, campaign_id: &str, session_number: u32) -> Plan {
    Plan {
        id: id.to_string(),
        name: format!("[{}] Plan {}", campaign_id, session_number),
        properties: PlanProperties {
            campaign_id: campaign_id.to_string(),
            session_number,
            title: format!("Plan {}", session_number),
            party: None,
            objectives: Vec::new(),
            content: Some("The party sets out.".to_string()),
            session_guide: None,
            extra: Default::default(),
        },
        text: None,
        parent: None,
    }
}

pub fn session_fixture(id: &str, campaign_id: &str, session_number: u32) -> Session {
    Session {
        id: id.to_string(),
        name: format!("[{}] Session {}", campaign_id, session_number),
        properties: SessionProperties {
            campaign_id: campaign_id.to_string(),
            session_number,
            summary: format!("Session {} happened.", session_number),
        },
        text: None,
        parent: None,
    }
}

pub struct MemoryStore {
    types: Vec<ObjectType>,
    objects: Mutex<Vec<(String, ContentObject)>>,
    next_id: AtomicUsize,
    find_calls: AtomicUsize,
    fail_finds: AtomicBool,
    fail_creates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_types(vec![
            ObjectType {
                id: PLAN_TYPE_ID.to_string(),
                name: "D&D Session Plan".to_string(),
                object_schema: None,
            },
            ObjectType {
                id: SESSION_TYPE_ID.to_string(),
                name: "D&D Session Summary".to_string(),
                object_schema: None,
            },
        ])
    }

    pub fn without_types() -> Self {
        Self::with_types(Vec::new())
    }

    fn with_types(types: Vec<ObjectType>) -> Self {
        Self {
            types,
            objects: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            find_calls: AtomicUsize::new(0),
            fail_finds: AtomicBool::new(false),
            fail_creates: AtomicBool::new(false),
        }
    }

    pub fn seed_plans(&self, campaign_id: &str, numbers: &[u32]) {
        let mut objects = self.objects.lock().unwrap();
        for &n in numbers {
            let plan = plan_fixture(&format!("plan-{}-{}", campaign_id, n), campaign_id, n);
            objects.push((PLAN_TYPE_ID.to_string(), to_object(&plan.id, &plan.name, plan.properties_value())));
        }
    }

    pub fn seed_sessions(&self, campaign_id: &str, numbers: &[u32]) {
        let mut objects = self.objects.lock().unwrap();
        for &n in numbers {
            let session = session_fixture(&format!("session-{}-{}", campaign_id, n), campaign_id, n);
            objects.push((
                SESSION_TYPE_ID.to_string(),
                to_object(&session.id, &session.name, session.properties_value()),
            ));
        }
    }

    /// Store a plan document as-is, without going through the typed fixture
    pub fn seed_raw_plan(&self, id: &str, properties: serde_json::Value) {
        self.objects
            .lock()
            .unwrap()
            .push((PLAN_TYPE_ID.to_string(), to_object(id, id, properties)));
    }

    pub fn fail_finds(&self) {
        self.fail_finds.store(true, Ordering::SeqCst);
    }

    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn plan_numbers(&self, campaign_id: &str) -> Vec<u32> {
        self.numbers(PLAN_TYPE_ID, campaign_id)
    }

    pub fn session_numbers(&self, campaign_id: &str) -> Vec<u32> {
        self.numbers(SESSION_TYPE_ID, campaign_id)
    }

    fn numbers(&self, type_id: &str, campaign_id: &str) -> Vec<u32> {
        let objects = self.objects.lock().unwrap();
        let mut numbers: Vec<u32> = objects
            .iter()
            .filter(|(t, o)| t == type_id && o.properties["campaignId"] == campaign_id)
            .filter_map(|(_, o)| o.properties["sessionNumber"].as_u64())
            .map(|n| n as u32)
            .collect();
        numbers.sort_unstable();
        numbers
    }
}

fn to_object(id: &str, name: &str, properties: serde_json::Value) -> ContentObject {
    ContentObject {
        id: id.to_string(),
        name: name.to_string(),
        properties,
        text: None,
        parent: None,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn resolve_type(&self, name: &str) -> Result<Option<ObjectType>, StoreError> {
        Ok(self.types.iter().find(|t| t.name == name).cloned())
    }

    async fn find(&self, query: &Query) -> Result<Vec<ContentObject>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .filter(|(t, o)| *t == query.type_id && o.properties["campaignId"] == query.campaign_id.as_str())
            .map(|(_, o)| o.clone())
            .collect())
    }

    async fn create(&self, object: CreateObject) -> Result<ContentObject, StoreError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 500,
                message: "write rejected".to_string(),
            });
        }
        let id = format!("obj-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = ContentObject {
            id,
            name: object.name,
            properties: object.properties,
            text: object.text,
            parent: object.parent,
        };
        self.objects
            .lock()
            .unwrap()
            .push((object.type_id, created.clone()));
        Ok(created)
    }
}

/// Answers planner and summarizer calls with deterministic content
pub struct ScriptedGenerator {
    calls: Mutex<Vec<(String, ExecutionRequest)>>,
    fail_on_call: Option<usize>,
    empty_results: bool,
    campaign_id: Option<String>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
            empty_results: false,
            campaign_id: None,
        }
    }

    /// Fail the n-th call (1-based), counting every interaction
    pub fn fail_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn empty_results(mut self) -> Self {
        self.empty_results = true;
        self
    }

    /// Planner results carry this campaign id
    pub fn with_campaign_id(mut self, campaign_id: &str) -> Self {
        self.campaign_id = Some(campaign_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, ExecutionRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, interaction: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == interaction)
            .count()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn execute(
        &self,
        interaction: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, GeneratorError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((interaction.to_string(), request.clone()));
            calls.len()
        };

        if self.fail_on_call == Some(call_number) {
            return Err(GeneratorError::Api {
                status: 503,
                message: "generator unavailable".to_string(),
            });
        }
        if self.empty_results {
            return Ok(ExecutionResult::default());
        }

        if let Some(plan) = request.data.get("sessionPlan") {
            let summary = format!(
                "The party played through session {}.",
                plan["sessionNumber"]
            );
            return Ok(ExecutionResult::new(serde_json::json!({ "summary": summary })));
        }

        let mut result = serde_json::json!({
            "title": format!("Session {} plan", request.data["sessionNumber"]),
            "content": "A hooded stranger waits at the inn.",
        });
        if let Some(ref campaign_id) = self.campaign_id {
            result["campaignId"] = serde_json::json!(campaign_id);
        }
        Ok(ExecutionResult::new(result))
    }
}
