#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::{
        init_test_tracing, insert_raw_entry, setup_test_app, setup_test_app_with_state,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{
        AnnualSummaryDto, CashBandDto, CashFlowReport, ClassificationDto, ClassificationTypeDto,
        ClassificationTypeInfo, CreateClassificationRequest, CreateEntryRequest, DashboardDto,
        EntryDto, EntryKindDto, FlowCategoryDto, MonthlyChartReport, MonthlySummariesReport,
        SettingDto, TopOutflowsReport, UpdateClassificationRequest, UpdateEntryRequest,
        UpdateSettingRequest,
    };
    use model::EntryKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_request(
        date: NaiveDate,
        kind: EntryKindDto,
        amount: Decimal,
        classification: Option<&str>,
    ) -> CreateEntryRequest {
        CreateEntryRequest {
            date,
            kind,
            category: None,
            classification: classification.map(str::to_string),
            item: None,
            amount,
            settlement_state: None,
        }
    }

    async fn create_entry(server: &TestServer, request: CreateEntryRequest) -> EntryDto {
        let response = server.post("/api/v1/entries").json(&request).await;
        if response.status_code() != StatusCode::CREATED {
            panic!(
                "Expected 201 Created, got {}: {}",
                response.status_code(),
                response.text()
            );
        }
        response.json::<ApiResponse<EntryDto>>().data
    }

    async fn set_setting(server: &TestServer, key: &str, value: &str) -> StatusCode {
        server
            .put(&format!("/api/v1/settings/{}", key))
            .json(&UpdateSettingRequest {
                value: value.to_string(),
            })
            .await
            .status_code()
    }

    // ===================== Health =====================

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    // ===================== Entries =====================

    #[tokio::test]
    async fn test_create_entry_derives_period_and_defaults() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&entry_request(
                date(2025, 3, 14),
                EntryKindDto::Outflow,
                dec!(1250.75),
                Some("LOAN"),
            ))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<EntryDto> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Entry created successfully");

        let entry = body.data;
        assert!(entry.id > 0);
        assert_eq!((entry.day, entry.month, entry.year), (14, 3, 2025));
        assert_eq!(entry.amount, dec!(1250.75));
        assert_eq!(entry.classification.as_deref(), Some("LOAN"));
        // Category follows the classification when not given
        assert_eq!(entry.category, FlowCategoryDto::Financial);
        assert_eq!(entry.settlement_state, "SETTLED");
    }

    #[tokio::test]
    async fn test_create_entry_rejects_negative_amount() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&entry_request(
                date(2025, 3, 14),
                EntryKindDto::Inflow,
                dec!(-10),
                None,
            ))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "NEGATIVE_AMOUNT");
        assert!(!error.success);
    }

    #[tokio::test]
    async fn test_create_entry_rejects_unknown_classification() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&entry_request(
                date(2025, 3, 14),
                EntryKindDto::Outflow,
                dec!(10),
                Some("NO SUCH THING"),
            ))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "UNKNOWN_CLASSIFICATION");
    }

    #[tokio::test]
    async fn test_get_entry_and_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let created = create_entry(
            &server,
            entry_request(date(2025, 1, 2), EntryKindDto::Inflow, dec!(500), None),
        )
        .await;

        let response = server.get(&format!("/api/v1/entries/{}", created.id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<EntryDto> = response.json();
        assert_eq!(body.data, created);

        let missing = server.get("/api/v1/entries/99999").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let error: ErrorResponse = missing.json();
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_entries_with_filters_and_paging() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for day in 1..=4 {
            create_entry(
                &server,
                entry_request(date(2025, 5, day), EntryKindDto::Inflow, Decimal::from(day), None),
            )
            .await;
        }
        create_entry(
            &server,
            entry_request(date(2025, 5, 10), EntryKindDto::Outflow, dec!(90), Some("FREIGHT")),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2025, 6, 1), EntryKindDto::Inflow, dec!(7), None),
        )
        .await;

        let may: ApiResponse<Vec<EntryDto>> =
            server.get("/api/v1/entries?year=2025&month=5").await.json();
        assert_eq!(may.data.len(), 5);
        assert!(may.data.windows(2).all(|w| w[0].date <= w[1].date));

        let outflows: ApiResponse<Vec<EntryDto>> =
            server.get("/api/v1/entries?kind=OUTFLOW").await.json();
        assert_eq!(outflows.data.len(), 1);
        assert_eq!(outflows.data[0].classification.as_deref(), Some("FREIGHT"));

        let page: ApiResponse<Vec<EntryDto>> = server
            .get("/api/v1/entries?year=2025&month=5&skip=1&limit=2")
            .await
            .json();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].day, 2);
        assert_eq!(page.data[1].day, 3);

        let by_range: ApiResponse<Vec<EntryDto>> = server
            .get("/api/v1/entries?date_from=2025-05-04&date_to=2025-06-30")
            .await
            .json();
        assert_eq!(by_range.data.len(), 3);
    }

    #[tokio::test]
    async fn test_list_entries_validates_query() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .get("/api/v1/entries?month=13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/v1/entries?limit=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/v1/entries?limit=1001")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_entry_recomputes_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let created = create_entry(
            &server,
            entry_request(date(2025, 1, 31), EntryKindDto::Outflow, dec!(80), Some("FREIGHT")),
        )
        .await;

        let response = server
            .put(&format!("/api/v1/entries/{}", created.id))
            .json(&UpdateEntryRequest {
                date: Some(date(2025, 2, 3)),
                amount: Some(dec!(95.5)),
                classification: Some(String::new()),
                ..Default::default()
            })
            .await;

        response.assert_status(StatusCode::OK);
        let updated = response.json::<ApiResponse<EntryDto>>().data;
        assert_eq!((updated.day, updated.month, updated.year), (3, 2, 2025));
        assert_eq!(updated.amount, dec!(95.5));
        assert_eq!(updated.classification, None);
        assert_eq!(updated.kind, EntryKindDto::Outflow);
    }

    #[tokio::test]
    async fn test_update_entry_rejects_negative_amount() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let created = create_entry(
            &server,
            entry_request(date(2025, 1, 5), EntryKindDto::Inflow, dec!(10), None),
        )
        .await;

        server
            .put(&format!("/api/v1/entries/{}", created.id))
            .json(&UpdateEntryRequest {
                amount: Some(dec!(-1)),
                ..Default::default()
            })
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/v1/entries/424242")
            .json(&UpdateEntryRequest::default())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let created = create_entry(
            &server,
            entry_request(date(2025, 1, 5), EntryKindDto::Inflow, dec!(10), None),
        )
        .await;

        let path = format!("/api/v1/entries/{}", created.id);
        server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_settlement() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = entry_request(date(2025, 2, 1), EntryKindDto::Outflow, dec!(10), None);
        request.settlement_state = Some("obsolete".to_string());
        let created = create_entry(&server, request).await;
        assert_eq!(created.settlement_state, "OBSOLETE");

        let path = format!("/api/v1/entries/{}/settle", created.id);
        let first: ApiResponse<EntryDto> = server.patch(&path).await.json();
        assert_eq!(first.data.settlement_state, "SETTLED");

        let second: ApiResponse<EntryDto> = server.patch(&path).await.json();
        assert_eq!(second.data.settlement_state, "UNSETTLED");

        server
            .patch("/api/v1/entries/31337/settle")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // ===================== Classifications =====================

    #[tokio::test]
    async fn test_list_classifications_by_kind() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/classifications?kind=TAX").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<ClassificationDto>> = response.json();
        assert!(!body.data.is_empty());
        assert!(body.data.iter().all(|c| c.kind == ClassificationTypeDto::Tax));
        assert!(body.data.iter().any(|c| c.name == "ICMS"));
        assert!(body.data.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[tokio::test]
    async fn test_classification_types() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let body: ApiResponse<Vec<ClassificationTypeInfo>> =
            server.get("/api/v1/classifications/types").await.json();

        assert_eq!(body.data.len(), 8);
        let fixed = body
            .data
            .iter()
            .find(|t| t.code == ClassificationTypeDto::FixedCost)
            .unwrap();
        assert_eq!(fixed.label, "Fixed Cost");
    }

    #[tokio::test]
    async fn test_create_classification_and_duplicates() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = CreateClassificationRequest {
            name: "  WAREHOUSE RENT ".to_string(),
            kind: ClassificationTypeDto::Investment,
            default_category: None,
        };
        let response = server.post("/api/v1/classifications").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<ApiResponse<ClassificationDto>>().data;
        assert_eq!(created.name, "WAREHOUSE RENT");
        assert_eq!(created.default_category, FlowCategoryDto::Investment);
        assert!(created.active);

        let duplicate = server.post("/api/v1/classifications").json(&request).await;
        duplicate.assert_status(StatusCode::CONFLICT);

        let empty = server
            .post("/api/v1/classifications")
            .json(&CreateClassificationRequest {
                name: "   ".to_string(),
                kind: ClassificationTypeDto::Tax,
                default_category: None,
            })
            .await;
        empty.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_deactivate_classification() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let created = server
            .post("/api/v1/classifications")
            .json(&CreateClassificationRequest {
                name: "PACKAGING".to_string(),
                kind: ClassificationTypeDto::VariableCost,
                default_category: None,
            })
            .await
            .json::<ApiResponse<ClassificationDto>>()
            .data;

        let renamed = server
            .put(&format!("/api/v1/classifications/{}", created.id))
            .json(&UpdateClassificationRequest {
                name: Some("BOXES".to_string()),
                kind: Some(ClassificationTypeDto::VariableExpense),
                ..Default::default()
            })
            .await;
        renamed.assert_status(StatusCode::OK);
        let renamed = renamed.json::<ApiResponse<ClassificationDto>>().data;
        assert_eq!(renamed.name, "BOXES");
        assert_eq!(renamed.kind, ClassificationTypeDto::VariableExpense);

        server
            .put(&format!("/api/v1/classifications/{}", created.id))
            .json(&UpdateClassificationRequest {
                name: Some("ICMS".to_string()),
                ..Default::default()
            })
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .delete(&format!("/api/v1/classifications/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let active: ApiResponse<Vec<ClassificationDto>> =
            server.get("/api/v1/classifications").await.json();
        assert!(active.data.iter().all(|c| c.name != "BOXES"));

        let all: ApiResponse<Vec<ClassificationDto>> = server
            .get("/api/v1/classifications?include_inactive=true")
            .await
            .json();
        let boxes = all.data.iter().find(|c| c.name == "BOXES").unwrap();
        assert!(!boxes.active);

        server
            .delete("/api/v1/classifications/99999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // ===================== Settings =====================

    #[tokio::test]
    async fn test_list_seeded_settings() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let body: ApiResponse<Vec<SettingDto>> = server.get("/api/v1/settings").await.json();

        let minimum = body
            .data
            .iter()
            .find(|s| s.key == "cash_policy.minimum")
            .unwrap();
        assert_eq!(minimum.value, "55000");
        assert!(body.data.iter().any(|s| s.key == "ledger.opening_balance"));
    }

    #[tokio::test]
    async fn test_update_setting_validation() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        assert_eq!(set_setting(&server, "cash_policy.minimum", "60000").await, StatusCode::OK);
        // Would put the minimum above the return point
        assert_eq!(
            set_setting(&server, "cash_policy.minimum", "150000").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            set_setting(&server, "cash_policy.maximum", "lots").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            set_setting(&server, "cash_policy.maximum", "").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            set_setting(&server, "ledger.opening_balance", "abc").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            set_setting(&server, "ledger.current_year", "2026").await,
            StatusCode::OK
        );
        assert_eq!(set_setting(&server, "no.such.key", "1").await, StatusCode::NOT_FOUND);

        let body: ApiResponse<Vec<SettingDto>> = server.get("/api/v1/settings").await.json();
        let minimum = body
            .data
            .iter()
            .find(|s| s.key == "cash_policy.minimum")
            .unwrap();
        assert_eq!(minimum.value, "60000");
    }

    // ===================== Reports =====================

    #[tokio::test]
    async fn test_dashboard_figures() {
        let _guard = init_test_tracing();
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_entry(
            &server,
            entry_request(date(2025, 3, 1), EntryKindDto::Inflow, dec!(60000), None),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2025, 3, 15), EntryKindDto::Inflow, dec!(500), None),
        )
        .await;
        let mut unsettled =
            entry_request(date(2025, 3, 15), EntryKindDto::Outflow, dec!(1000), None);
        unsettled.settlement_state = Some("UNSETTLED".to_string());
        create_entry(&server, unsettled).await;

        let response = server.get("/api/v1/dashboard?date=2025-03-15").await;

        response.assert_status(StatusCode::OK);
        let dashboard = response.json::<ApiResponse<DashboardDto>>().data;
        assert_eq!(dashboard.today, date(2025, 3, 15));
        assert_eq!(dashboard.current_balance, dec!(60500));
        assert_eq!(dashboard.band, CashBandDto::Normal);
        assert_eq!(dashboard.minimum, dec!(55000));
        assert_eq!(dashboard.return_point, dec!(100000));
        assert_eq!(dashboard.maximum, dec!(355000));
        assert_eq!(dashboard.month_to_date.inflows, dec!(60500));
        assert_eq!(dashboard.month_to_date.outflows, dec!(1000));
        assert_eq!(dashboard.today_totals.inflows, dec!(500));
        assert_eq!(dashboard.today_totals.outflows, Decimal::ZERO);
        assert!(dashboard.issues.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_reflects_writes_after_caching() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let before: ApiResponse<DashboardDto> =
            server.get("/api/v1/dashboard?date=2025-04-01").await.json();
        assert_eq!(before.data.band, CashBandDto::Low);

        create_entry(
            &server,
            entry_request(date(2025, 4, 1), EntryKindDto::Inflow, dec!(400000), None),
        )
        .await;

        let after: ApiResponse<DashboardDto> =
            server.get("/api/v1/dashboard?date=2025-04-01").await.json();
        assert_eq!(after.data.current_balance, dec!(400000));
        assert_eq!(after.data.band, CashBandDto::High);
    }

    #[tokio::test]
    async fn test_dashboard_reports_invalid_cash_policy() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        // Bypass the settings endpoint, which would refuse this value
        use model::entities::setting;
        use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
        let maximum = setting::Entity::find()
            .filter(setting::Column::Key.eq("cash_policy.maximum"))
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: setting::ActiveModel = maximum.into();
        active.value = Set("1000".to_string());
        active.update(&state.db).await.unwrap();

        let response = server.get("/api/v1/dashboard?date=2025-04-01").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "CASH_POLICY_CONFIGURATION");
    }

    #[tokio::test]
    async fn test_cash_flow_chains_previous_month() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        assert_eq!(set_setting(&server, "ledger.opening_balance", "1000").await, StatusCode::OK);
        create_entry(
            &server,
            entry_request(date(2025, 1, 10), EntryKindDto::Inflow, dec!(500), None),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2025, 1, 20), EntryKindDto::Outflow, dec!(200), None),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2025, 2, 3), EntryKindDto::Inflow, dec!(50), None),
        )
        .await;
        let mut unsettled = entry_request(date(2025, 2, 3), EntryKindDto::Outflow, dec!(20), None);
        unsettled.settlement_state = Some("UNSETTLED".to_string());
        create_entry(&server, unsettled).await;
        create_entry(
            &server,
            entry_request(date(2025, 2, 28), EntryKindDto::Outflow, dec!(30), None),
        )
        .await;

        let response = server.get("/api/v1/cash-flow?year=2025&month=2").await;

        response.assert_status(StatusCode::OK);
        let report = response.json::<ApiResponse<CashFlowReport>>().data;
        assert_eq!(report.opening_balance, dec!(1300));
        assert_eq!(report.days.len(), 2);

        let first = &report.days[0];
        assert_eq!(first.date, date(2025, 2, 3));
        assert_eq!(first.inflow_total, dec!(50));
        assert_eq!(first.outflow_total, dec!(20));
        assert_eq!(first.running_balance, dec!(1330));

        let last = &report.days[1];
        assert_eq!(last.day, 28);
        assert_eq!(last.running_balance, dec!(1300));
        assert_eq!(report.closing_balance, dec!(1300));
    }

    #[tokio::test]
    async fn test_cash_flow_closing_carries_into_next_month() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_entry(
            &server,
            entry_request(date(2025, 1, 5), EntryKindDto::Inflow, dec!(1000), None),
        )
        .await;
        let mut obsolete = entry_request(date(2025, 1, 6), EntryKindDto::Outflow, dec!(200), None);
        obsolete.settlement_state = Some("OBSOLETE".to_string());
        create_entry(&server, obsolete).await;

        let january = server
            .get("/api/v1/cash-flow?year=2025&month=1")
            .await
            .json::<ApiResponse<CashFlowReport>>()
            .data;
        let february = server
            .get("/api/v1/cash-flow?year=2025&month=2")
            .await
            .json::<ApiResponse<CashFlowReport>>()
            .data;

        assert_eq!(january.days.len(), 1);
        assert_eq!(january.closing_balance, dec!(1000));
        assert_eq!(february.opening_balance, january.closing_balance);
    }

    #[tokio::test]
    async fn test_cash_flow_rejects_invalid_month() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .get("/api/v1/cash-flow?year=2025&month=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reports_surface_malformed_entries() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        insert_raw_entry(
            &state.db,
            date(2025, 6, 10),
            EntryKind::Inflow,
            dec!(100),
            "SETTLED",
            None,
            None,
        )
        .await;
        let negative = insert_raw_entry(
            &state.db,
            date(2025, 6, 11),
            EntryKind::Outflow,
            dec!(-40),
            "SETTLED",
            None,
            None,
        )
        .await;
        let drifted = insert_raw_entry(
            &state.db,
            date(2025, 6, 12),
            EntryKind::Inflow,
            dec!(5),
            "SETTLED",
            None,
            Some((30, 5, 2025)),
        )
        .await;

        let report = server
            .get("/api/v1/cash-flow?year=2025&month=6")
            .await
            .json::<ApiResponse<CashFlowReport>>()
            .data;

        // The negative entry is left out, the drifted one counts by its date
        assert_eq!(report.closing_balance, dec!(105));
        assert_eq!(report.issues.len(), 2);
        let excluded = report
            .issues
            .iter()
            .find(|i| i.entry_id == Some(negative.id))
            .unwrap();
        assert_eq!(excluded.reason, "NEGATIVE_AMOUNT");
        assert!(excluded.excluded);
        let kept = report
            .issues
            .iter()
            .find(|i| i.entry_id == Some(drifted.id))
            .unwrap();
        assert_eq!(kept.reason, "PERIOD_MISMATCH");
        assert!(!kept.excluded);
    }

    #[tokio::test]
    async fn test_monthly_summaries() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_entry(
            &server,
            entry_request(date(2024, 1, 5), EntryKindDto::Inflow, dec!(10000), Some("PRODUCT SALES")),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2024, 1, 6), EntryKindDto::Outflow, dec!(2000), Some("RENT / INSURANCE")),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2024, 1, 7), EntryKindDto::Outflow, dec!(300), Some("ICMS")),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2024, 2, 1), EntryKindDto::Inflow, dec!(5000), Some("LOAN")),
        )
        .await;
        let mut obsolete =
            entry_request(date(2024, 2, 2), EntryKindDto::Outflow, dec!(999), Some("FREIGHT"));
        obsolete.settlement_state = Some("OBSOLETE".to_string());
        create_entry(&server, obsolete).await;

        let response = server.get("/api/v1/summaries/monthly?year=2024").await;

        response.assert_status(StatusCode::OK);
        let report = response.json::<ApiResponse<MonthlySummariesReport>>().data;
        assert_eq!(report.months.len(), 12);

        let january = &report.months[0];
        assert_eq!(january.opening_balance, Decimal::ZERO);
        assert_eq!(january.total_inflows, dec!(10000));
        assert_eq!(january.total_outflows, dec!(2300));
        assert_eq!(january.by_type.fixed_cost, dec!(2000));
        assert_eq!(january.by_type.tax, dec!(300));
        assert_eq!(january.flows.operational, dec!(7700));
        assert_eq!(january.closing_balance, dec!(7700));

        let february = &report.months[1];
        assert_eq!(february.opening_balance, dec!(7700));
        assert_eq!(february.total_outflows, Decimal::ZERO);
        assert_eq!(february.by_type.variable_expense, Decimal::ZERO);
        assert_eq!(february.flows.financial, dec!(5000));
        assert_eq!(february.closing_balance, dec!(12700));

        let december = &report.months[11];
        assert_eq!(december.closing_balance, dec!(12700));

        let only_february: ApiResponse<MonthlySummariesReport> = server
            .get("/api/v1/summaries/monthly?year=2024&month=2")
            .await
            .json();
        assert_eq!(only_february.data.months.len(), 1);
        assert_eq!(only_february.data.months[0], *february);
    }

    #[tokio::test]
    async fn test_annual_summary_and_chart() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_entry(
            &server,
            entry_request(date(2023, 3, 1), EntryKindDto::Inflow, dec!(800), None),
        )
        .await;
        create_entry(
            &server,
            entry_request(date(2023, 11, 30), EntryKindDto::Outflow, dec!(300), Some("FREIGHT")),
        )
        .await;

        let annual = server
            .get("/api/v1/summaries/annual?year=2023")
            .await
            .json::<ApiResponse<AnnualSummaryDto>>()
            .data;
        assert_eq!(annual.year, 2023);
        assert_eq!(annual.total_inflows, dec!(800));
        assert_eq!(annual.total_outflows, dec!(300));
        assert_eq!(annual.net, dec!(500));
        assert_eq!(annual.by_type.variable_expense, dec!(300));
        assert_eq!(annual.closing_balance, dec!(500));
        assert_eq!(annual.months.len(), 12);

        let chart = server
            .get("/api/v1/dashboard/monthly-chart?year=2023")
            .await
            .json::<ApiResponse<MonthlyChartReport>>()
            .data;
        assert_eq!(chart.months, annual.months);
        assert_eq!(chart.months[2].inflows, dec!(800));
        assert_eq!(chart.months[10].closing_balance, dec!(500));
    }

    #[tokio::test]
    async fn test_top_outflows() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for (amount, classification) in [
            (dec!(100), Some("FREIGHT")),
            (dec!(250), Some("FREIGHT")),
            (dec!(400), Some("ICMS")),
            (dec!(50), None),
        ] {
            create_entry(
                &server,
                entry_request(date(2025, 8, 4), EntryKindDto::Outflow, amount, classification),
            )
            .await;
        }
        create_entry(
            &server,
            entry_request(date(2025, 8, 5), EntryKindDto::Inflow, dec!(9999), Some("PRODUCT SALES")),
        )
        .await;

        let report = server
            .get("/api/v1/dashboard/top-outflows?year=2025&month=8&limit=2")
            .await
            .json::<ApiResponse<TopOutflowsReport>>()
            .data;

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].classification, "ICMS");
        assert_eq!(report.items[0].total, dec!(400));
        assert_eq!(report.items[1].classification, "FREIGHT");
        assert_eq!(report.items[1].total, dec!(350));
        assert_eq!(report.items[1].count, 2);

        let all = server
            .get("/api/v1/dashboard/top-outflows?year=2025&month=8")
            .await
            .json::<ApiResponse<TopOutflowsReport>>()
            .data;
        assert_eq!(all.items.len(), 3);
        assert_eq!(all.items[2].classification, "Unclassified");

        server
            .get("/api/v1/dashboard/top-outflows?year=2025&month=8&limit=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reports_default_to_configured_year() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        assert_eq!(set_setting(&server, "ledger.current_year", "2022").await, StatusCode::OK);

        let annual = server
            .get("/api/v1/summaries/annual")
            .await
            .json::<ApiResponse<AnnualSummaryDto>>()
            .data;
        assert_eq!(annual.year, 2022);

        let summaries = server
            .get("/api/v1/summaries/monthly")
            .await
            .json::<ApiResponse<MonthlySummariesReport>>()
            .data;
        assert_eq!(summaries.year, 2022);
    }
}
