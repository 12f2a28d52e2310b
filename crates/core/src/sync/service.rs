//! Behavior record synchronizer - core business logic

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use meritsync_domain::constants::{
    FIELD_CLASSROOM, FIELD_SCORE, FIELD_STATUS_EN, FIELD_STATUS_TH, FIELD_SUBMITTED_DATE,
    FIELD_TEACHER, ITEMS_PAGE_SIZE, LABEL_BEHAVIOR_RECORD, LABEL_PENDING, STATUS_PENDING,
};
use meritsync_domain::utils::record_text;
use meritsync_domain::utils::validation::validate_draft;
use meritsync_domain::{
    BehaviorRecord, Config, FieldDescriptor, FieldKind, MeritSyncError, RecordDraft, RecordStatus,
    Result, TrackerLink,
};
use tracing::{info, instrument, warn};

use super::ports::{FieldValue, FieldValuePatch, ItemSnapshot, NewDocument, TrackerGateway};
use super::registry::FieldRegistry;

/// Synchronizes behavior records with the external tracker.
///
/// All tracker interaction is sequential: each step of the create protocol
/// feeds identifiers into the next, and no operation shares mutable state
/// with another.
pub struct SyncService {
    gateway: Arc<dyn TrackerGateway>,
    registry: FieldRegistry,
    config: Config,
}

impl SyncService {
    /// Create a new synchronizer over a tracker gateway.
    pub fn new(gateway: Arc<dyn TrackerGateway>, config: Config) -> Self {
        let registry = FieldRegistry::new(Arc::clone(&gateway));
        Self { gateway, registry, config }
    }

    /// Create a behavior record on the tracker.
    ///
    /// Three steps, strictly ordered, none idempotent, none rolled back:
    /// 1. encode the draft and create the document (failure aborts with no
    ///    tracker side effects),
    /// 2. attach the document to the project (failure leaves an orphaned
    ///    document behind; the error surfaces and no cleanup is attempted),
    /// 3. resolve the field registry and push one field value per managed
    ///    field (a registry failure aborts this step as a whole; a single
    ///    field update failing is logged and the remaining fields are still
    ///    pushed).
    ///
    /// # Errors
    /// `InvalidInput` for a draft that fails validation, otherwise whatever
    /// the tracker calls surface.
    #[instrument(skip(self, draft), fields(student_id = %draft.student_id))]
    pub async fn create(&self, draft: &RecordDraft) -> Result<BehaviorRecord> {
        validate_draft(draft, &self.config)?;

        let submitted = Utc::now();
        let encoded = record_text::encode(draft, &self.config.school.name, submitted);
        let document = NewDocument {
            title: encoded.title,
            body: encoded.body,
            labels: vec![LABEL_BEHAVIOR_RECORD.to_string(), LABEL_PENDING.to_string()],
        };

        let handle = self.gateway.create_document(&document).await?;
        info!(document_number = handle.number, "created tracker document");

        let item_id = self.gateway.add_item(&handle.node_id).await?;
        info!(item_id = %item_id, "attached document to project");

        let link = TrackerLink {
            item_id: item_id.clone(),
            document_id: handle.node_id,
            document_number: handle.number,
            url: handle.url,
        };

        self.populate_fields(&item_id, draft, submitted.date_naive()).await?;

        Ok(BehaviorRecord::from_draft(draft, &link, submitted.date_naive()))
    }

    /// List the current page of behavior records.
    ///
    /// Fetches at most one page of project items and composes each into a
    /// record: field values are merged by name, then the document title and
    /// body are decoded for the text-embedded fields. No pagination beyond
    /// the first page.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<BehaviorRecord>> {
        let mut items = self.gateway.fetch_items(ITEMS_PAGE_SIZE).await?;
        items.truncate(ITEMS_PAGE_SIZE);
        Ok(items.into_iter().map(compose_record).collect())
    }

    /// Move a record to the status option whose name contains `status_label`.
    ///
    /// This is the sole state-transition entry point. It accepts any option
    /// present on the tracker's status field; the pending → under-review →
    /// approved/rejected workflow is a convention of the callers, not
    /// enforced here.
    ///
    /// # Errors
    /// `FieldNotFound` when the project has no status field,
    /// `StatusOptionNotFound` when no option matches the label; in both
    /// cases no mutation is issued.
    #[instrument(skip(self))]
    pub async fn update_status(&self, item_id: &str, status_label: &str) -> Result<()> {
        let field = self.registry.find_status_field().await?;
        let option = field
            .option_containing(status_label)
            .ok_or_else(|| MeritSyncError::StatusOptionNotFound(status_label.to_string()))?;

        let patch = FieldValuePatch::SingleSelect { option_id: option.id.clone() };
        self.gateway.update_field_value(item_id, &field.id, &patch).await
    }

    /// Step 3 of the create protocol: push one field value per managed
    /// field. Each update is an independent call.
    async fn populate_fields(
        &self,
        item_id: &str,
        draft: &RecordDraft,
        submitted: NaiveDate,
    ) -> Result<()> {
        let fields = self.registry.resolve().await?;

        let mut patches: Vec<(&FieldDescriptor, FieldValuePatch)> = Vec::new();
        for field in &fields {
            match build_patch(field, draft, submitted) {
                Ok(Some(patch)) => patches.push((field, patch)),
                Ok(None) => {}
                Err(error) => {
                    warn!(field = %field.name, error = %error, "skipping field with unexpected type");
                }
            }
        }

        for (field, patch) in patches {
            if let Err(error) = self.gateway.update_field_value(item_id, &field.id, &patch).await {
                warn!(field = %field.name, error = %error, "field value update failed");
            }
        }

        Ok(())
    }
}

/// Build the field-value payload for one resolved field.
///
/// Returns `Ok(None)` when the field is intentionally left unset: the status
/// field without a pending option, or a classroom with no matching select
/// option. A managed field whose declared kind does not match the expected
/// payload shape is an error.
fn build_patch(
    field: &FieldDescriptor,
    draft: &RecordDraft,
    submitted: NaiveDate,
) -> Result<Option<FieldValuePatch>> {
    let is_status = field.name == FIELD_STATUS_EN || field.name == FIELD_STATUS_TH;

    let patch = match (&field.kind, field.name.as_str()) {
        (FieldKind::SingleSelect { .. }, _) if is_status => {
            let option = field.option_containing(STATUS_PENDING);
            if option.is_none() {
                warn!(field = %field.name, "status field has no pending option; leaving unset");
            }
            option.map(|option| FieldValuePatch::SingleSelect { option_id: option.id.clone() })
        }
        (FieldKind::SingleSelect { .. }, FIELD_CLASSROOM) => {
            // No matching classroom option is a silent skip by contract.
            field
                .option_named(&draft.classroom)
                .map(|option| FieldValuePatch::SingleSelect { option_id: option.id.clone() })
        }
        (FieldKind::Number, FIELD_SCORE) => Some(FieldValuePatch::Number(f64::from(draft.score))),
        (FieldKind::Text, FIELD_TEACHER) => {
            Some(FieldValuePatch::Text(draft.teacher_name.clone()))
        }
        (FieldKind::Date, FIELD_SUBMITTED_DATE) => Some(FieldValuePatch::Date(submitted)),
        (kind, name) => {
            return Err(MeritSyncError::InvalidInput(format!(
                "field {name:?} has unexpected kind {kind:?}"
            )))
        }
    };

    Ok(patch)
}

/// Compose one project item into a behavior record.
fn compose_record(item: ItemSnapshot) -> BehaviorRecord {
    let mut record = BehaviorRecord { item_id: item.item_id, ..BehaviorRecord::default() };

    if let Some(content) = item.content {
        record.document_id = Some(content.node_id);
        record.document_number = Some(content.number);
        record.title = content.title;
        record.body = content.body;
        record.state = content.state;
        record.created_at = content.created_at;
        record.updated_at = content.updated_at;
        record.url = content.url;
    }

    for value in item.field_values {
        merge_field_value(&mut record, value);
    }

    if let Some(title) = record.title.clone() {
        let decoded = record_text::decode_title(&title);
        record.full_name = decoded.full_name;
        record.student_id = decoded.student_id;
        // The classroom field value wins over the title-embedded copy.
        if record.classroom.is_none() {
            record.classroom = decoded.classroom;
        }
    }

    if let Some(body) = record.body.clone() {
        let decoded = record_text::decode_body(&body);
        record.student_number = decoded.student_number;
        record.good_behavior = decoded.good_behavior;
    }

    record
}

fn merge_field_value(record: &mut BehaviorRecord, value: FieldValue) {
    match value {
        FieldValue::SingleSelect { field_name, option_name }
            if field_name == FIELD_STATUS_EN || field_name == FIELD_STATUS_TH =>
        {
            record.status = RecordStatus::from_option_name(&option_name);
        }
        FieldValue::SingleSelect { field_name, option_name } if field_name == FIELD_CLASSROOM => {
            record.classroom = Some(option_name);
        }
        FieldValue::Number { field_name, number } if field_name == FIELD_SCORE => {
            record.score = Some(number);
        }
        FieldValue::Text { field_name, text } if field_name == FIELD_TEACHER => {
            record.teacher_name = Some(text);
        }
        FieldValue::Date { field_name, date } if field_name == FIELD_SUBMITTED_DATE => {
            record.submitted_date = Some(date);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use meritsync_domain::{FieldKind, SelectOption, TrackerConfig};

    use super::super::ports::{DocumentHandle, ItemContent};
    use super::*;

    /// Gateway calls recorded by the mock, in order.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateDocument,
        AddItem,
        UpdateField { field_id: String, patch: FieldValuePatch },
        FetchFields,
        FetchItems,
    }

    #[derive(Default)]
    struct MockGateway {
        calls: Mutex<Vec<Call>>,
        fields: Vec<FieldDescriptor>,
        items: Vec<ItemSnapshot>,
        fail_add_item: bool,
        fail_fetch_fields: bool,
    }

    impl MockGateway {
        fn recorded(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
            self.fields = fields;
            self
        }
    }

    #[async_trait]
    impl TrackerGateway for MockGateway {
        async fn create_document(&self, _document: &NewDocument) -> Result<DocumentHandle> {
            self.record(Call::CreateDocument);
            Ok(DocumentHandle {
                node_id: "I_node".into(),
                number: 7,
                url: "https://tracker.example/7".into(),
            })
        }

        async fn add_item(&self, _document_node_id: &str) -> Result<String> {
            self.record(Call::AddItem);
            if self.fail_add_item {
                return Err(MeritSyncError::Api("could not add item".into()));
            }
            Ok("PVTI_item".into())
        }

        async fn update_field_value(
            &self,
            _item_id: &str,
            field_id: &str,
            patch: &FieldValuePatch,
        ) -> Result<()> {
            self.record(Call::UpdateField { field_id: field_id.into(), patch: patch.clone() });
            Ok(())
        }

        async fn fetch_fields(&self, _limit: usize) -> Result<Vec<FieldDescriptor>> {
            self.record(Call::FetchFields);
            if self.fail_fetch_fields {
                return Err(MeritSyncError::Network("fields query failed".into()));
            }
            Ok(self.fields.clone())
        }

        async fn fetch_items(&self, _limit: usize) -> Result<Vec<ItemSnapshot>> {
            self.record(Call::FetchItems);
            Ok(self.items.clone())
        }
    }

    fn project_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor {
                id: "F_status".into(),
                name: "Status".into(),
                kind: FieldKind::SingleSelect {
                    options: vec![
                        SelectOption { id: "opt_pending".into(), name: "รออนุมัติ".into() },
                        SelectOption { id: "opt_approved".into(), name: "อนุมัติแล้ว".into() },
                        SelectOption { id: "opt_rejected".into(), name: "ไม่อนุมัติ".into() },
                    ],
                },
            },
            FieldDescriptor { id: "F_score".into(), name: "คะแนน".into(), kind: FieldKind::Number },
            FieldDescriptor {
                id: "F_classroom".into(),
                name: "ห้องเรียน".into(),
                kind: FieldKind::SingleSelect {
                    options: vec![SelectOption { id: "opt_42".into(), name: "4/2".into() }],
                },
            },
            FieldDescriptor {
                id: "F_teacher".into(),
                name: "ครูผู้ลงทะเบียน".into(),
                kind: FieldKind::Text,
            },
            FieldDescriptor {
                id: "F_date".into(),
                name: "วันที่ส่ง".into(),
                kind: FieldKind::Date,
            },
        ]
    }

    fn test_config() -> Config {
        Config {
            tracker: TrackerConfig {
                owner: "school".into(),
                repo: "records".into(),
                token: "token".into(),
                project_id: "PVT_x".into(),
                api_base: "https://api.example".into(),
                graphql_url: "https://api.example/graphql".into(),
            },
            school: Default::default(),
            export: Default::default(),
            limits: Default::default(),
        }
    }

    fn valid_draft() -> RecordDraft {
        RecordDraft {
            student_id: "123456".into(),
            student_number: 12,
            full_name: "เด็กชายสมชาย ใจดี".into(),
            classroom: "4/2".into(),
            good_behavior: "เก็บกระเป๋าเงินได้และนำไปคืนเจ้าของ".into(),
            score: 5,
            teacher_name: "ครูสมศรี".into(),
        }
    }

    fn service(gateway: MockGateway) -> (Arc<MockGateway>, SyncService) {
        let gateway = Arc::new(gateway);
        let service = SyncService::new(Arc::clone(&gateway) as Arc<dyn TrackerGateway>, test_config());
        (gateway, service)
    }

    #[tokio::test]
    async fn create_runs_all_three_steps_in_order() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        let record = service.create(&valid_draft()).await.unwrap();

        assert_eq!(record.item_id, "PVTI_item");
        assert_eq!(record.document_number, Some(7));
        assert_eq!(record.status, Some(RecordStatus::Pending));

        let calls = gateway.recorded();
        assert_eq!(calls[0], Call::CreateDocument);
        assert_eq!(calls[1], Call::AddItem);
        assert_eq!(calls[2], Call::FetchFields);
        // One update per managed field: status, score, classroom, teacher, date.
        let updates: Vec<_> = calls
            .iter()
            .filter(|call| matches!(call, Call::UpdateField { .. }))
            .collect();
        assert_eq!(updates.len(), 5);
    }

    #[tokio::test]
    async fn create_pushes_score_as_float_payload() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        service.create(&valid_draft()).await.unwrap();

        let score_patch = gateway.recorded().into_iter().find_map(|call| match call {
            Call::UpdateField { field_id, patch } if field_id == "F_score" => Some(patch),
            _ => None,
        });
        assert_eq!(score_patch, Some(FieldValuePatch::Number(5.0)));
    }

    #[tokio::test]
    async fn create_sets_status_to_pending_option() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        service.create(&valid_draft()).await.unwrap();

        let status_patch = gateway.recorded().into_iter().find_map(|call| match call {
            Call::UpdateField { field_id, patch } if field_id == "F_status" => Some(patch),
            _ => None,
        });
        assert_eq!(
            status_patch,
            Some(FieldValuePatch::SingleSelect { option_id: "opt_pending".into() })
        );
    }

    #[tokio::test]
    async fn create_skips_classroom_without_matching_option() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        let mut draft = valid_draft();
        draft.classroom = "5/3".into();
        service.create(&draft).await.unwrap();

        let classroom_updates = gateway
            .recorded()
            .into_iter()
            .filter(|call| matches!(call, Call::UpdateField { field_id, .. } if field_id == "F_classroom"))
            .count();
        assert_eq!(classroom_updates, 0);
    }

    #[tokio::test]
    async fn attach_failure_surfaces_and_stops_before_field_updates() {
        let gateway = MockGateway {
            fail_add_item: true,
            ..MockGateway::default().with_fields(project_fields())
        };
        let (gateway, service) = service(gateway);

        let result = service.create(&valid_draft()).await;

        assert!(matches!(result, Err(MeritSyncError::Api(_))));
        let calls = gateway.recorded();
        assert_eq!(calls, vec![Call::CreateDocument, Call::AddItem]);
    }

    #[tokio::test]
    async fn registry_failure_aborts_field_population_as_a_whole() {
        let gateway = MockGateway {
            fail_fetch_fields: true,
            ..MockGateway::default().with_fields(project_fields())
        };
        let (gateway, service) = service(gateway);

        let result = service.create(&valid_draft()).await;

        assert!(matches!(result, Err(MeritSyncError::Network(_))));
        let updates = gateway
            .recorded()
            .into_iter()
            .filter(|call| matches!(call, Call::UpdateField { .. }))
            .count();
        assert_eq!(updates, 0);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_any_tracker_call() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        let mut draft = valid_draft();
        draft.score = 9;
        let result = service.create(&draft).await;

        assert!(matches!(result, Err(MeritSyncError::InvalidInput(_))));
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn update_status_issues_single_select_mutation() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        service.update_status("PVTI_item", "อนุมัติแล้ว").await.unwrap();

        let calls = gateway.recorded();
        assert_eq!(calls[0], Call::FetchFields);
        assert_eq!(
            calls[1],
            Call::UpdateField {
                field_id: "F_status".into(),
                patch: FieldValuePatch::SingleSelect { option_id: "opt_approved".into() },
            }
        );
    }

    #[tokio::test]
    async fn update_status_with_unknown_label_issues_no_mutation() {
        let (gateway, service) = service(MockGateway::default().with_fields(project_fields()));

        let result = service.update_status("PVTI_item", "เสร็จสิ้น").await;

        assert!(matches!(result, Err(MeritSyncError::StatusOptionNotFound(_))));
        let updates = gateway
            .recorded()
            .into_iter()
            .filter(|call| matches!(call, Call::UpdateField { .. }))
            .count();
        assert_eq!(updates, 0);
    }

    #[tokio::test]
    async fn update_status_without_status_field_fails() {
        let (_, service) = service(MockGateway::default().with_fields(vec![FieldDescriptor {
            id: "F_score".into(),
            name: "คะแนน".into(),
            kind: FieldKind::Number,
        }]));

        let result = service.update_status("PVTI_item", "อนุมัติแล้ว").await;
        assert!(matches!(result, Err(MeritSyncError::FieldNotFound(_))));
    }

    #[tokio::test]
    async fn list_composes_field_values_and_decoded_text() {
        let submitted = Utc::now();
        let encoded = record_text::encode(&valid_draft(), "โรงเรียนทดสอบ", submitted);

        let item = ItemSnapshot {
            item_id: "PVTI_item".into(),
            content: Some(ItemContent {
                node_id: "I_node".into(),
                number: 7,
                title: Some(encoded.title),
                body: Some(encoded.body),
                state: Some("open".into()),
                created_at: Some(submitted),
                updated_at: Some(submitted),
                url: Some("https://tracker.example/7".into()),
            }),
            field_values: vec![
                FieldValue::SingleSelect {
                    field_name: "สถานะ".into(),
                    option_name: "✅ อนุมัติแล้ว".into(),
                },
                FieldValue::Number { field_name: "คะแนน".into(), number: 5.0 },
                FieldValue::Text {
                    field_name: "ครูผู้ลงทะเบียน".into(),
                    text: "ครูสมศรี".into(),
                },
                FieldValue::Date {
                    field_name: "วันที่ส่ง".into(),
                    date: submitted.date_naive(),
                },
            ],
        };

        let gateway = MockGateway { items: vec![item], ..MockGateway::default() };
        let (_, service) = service(gateway);

        let records = service.list().await.unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.status, Some(RecordStatus::Approved));
        assert_eq!(record.score, Some(5.0));
        assert_eq!(record.full_name.as_deref(), Some("เด็กชายสมชาย ใจดี"));
        assert_eq!(record.student_id.as_deref(), Some("123456"));
        assert_eq!(record.student_number, Some(12));
        // Classroom was not a field value, so the title-embedded copy fills in.
        assert_eq!(record.classroom.as_deref(), Some("4/2"));
        assert_eq!(record.teacher_name.as_deref(), Some("ครูสมศรี"));
    }

    #[tokio::test]
    async fn list_never_exceeds_the_page_cap() {
        let items: Vec<ItemSnapshot> = (0..ITEMS_PAGE_SIZE + 10)
            .map(|index| ItemSnapshot {
                item_id: format!("PVTI_{index}"),
                ..ItemSnapshot::default()
            })
            .collect();

        let gateway = MockGateway { items, ..MockGateway::default() };
        let (_, service) = service(gateway);

        let records = service.list().await.unwrap();
        assert_eq!(records.len(), ITEMS_PAGE_SIZE);
    }
}
