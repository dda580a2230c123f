//! Form flow scenarios through the public API

use bluecycle::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct StubTransport {
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
    fail: bool,
}

#[async_trait]
impl SubmissionTransport for StubTransport {
    async fn dispatch(
        &self,
        url: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        self.payloads.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(TransportError::Unreachable {
                url: url.to_string(),
                message: "dns lookup failed".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn form_with(transport: StubTransport, role: Role) -> (FormController, NotificationBus) {
    let bus = NotificationBus::new(16);
    let client = SubmissionClient::new(EndpointsConfig::default(), transport);
    (FormController::new(role, client, bus.clone()), bus)
}

fn enter_scenario_values(form: &FormController) {
    for (name, value) in [
        ("name", "A"),
        ("phone", "9876543210"),
        ("quantity", "500"),
        ("location", "Addr"),
        ("pinCode", "560001"),
        ("deliveryDate", "2024-01-01"),
    ] {
        form.set_field(name, value);
    }
}

#[tokio::test]
async fn test_buyer_scenario_sent() {
    let transport = StubTransport::default();
    let (form, bus) = form_with(transport.clone(), Role::Buyer);
    let mut rx = bus.subscribe();
    enter_scenario_values(&form);

    assert_eq!(
        form.submit().await,
        SubmitResult::Submitted(Outcome::Sent)
    );

    let payloads = transport.payloads.lock().unwrap().clone();
    assert_eq!(payloads.len(), 1);
    let body = serde_json::to_value(&payloads[0]).unwrap();
    assert_eq!(body["type"], "buyer");

    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(form.values().is_empty());
    assert!(form.errors().is_empty());

    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.notification, Notification::submitted());
    assert_eq!(envelope.role, Role::Buyer);
}

#[tokio::test]
async fn test_buyer_scenario_transport_failed() {
    let transport = StubTransport {
        fail: true,
        ..Default::default()
    };
    let (form, bus) = form_with(transport, Role::Buyer);
    let mut rx = bus.subscribe();
    enter_scenario_values(&form);
    let entered = form.values();

    assert_eq!(
        form.submit().await,
        SubmitResult::Submitted(Outcome::TransportFailed)
    );

    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.values(), entered);

    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.notification, Notification::submission_failed());
    assert_eq!(envelope.notification.severity, Severity::Destructive);
}

#[tokio::test]
async fn test_resubmit_after_failure_reuses_values() {
    let failing = StubTransport {
        fail: true,
        ..Default::default()
    };
    let (form, _bus) = form_with(failing.clone(), Role::Buyer);
    enter_scenario_values(&form);

    form.submit().await;
    form.submit().await;

    let payloads = failing.payloads.lock().unwrap();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0], payloads[1]);
}

#[tokio::test]
async fn test_seller_missing_society_name() {
    let transport = StubTransport::default();
    let (form, _bus) = form_with(transport.clone(), Role::Seller);
    enter_scenario_values(&form);

    let result = form.submit().await;

    let errors = match result {
        SubmitResult::Invalid(errors) => errors,
        other => panic!("expected validation failure, got {:?}", other),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(Field::SocietyName),
        Some("Society Name is required")
    );
    assert!(transport.payloads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_switching_role_starts_over() {
    let transport = StubTransport::default();
    let (form, _bus) = form_with(transport, Role::Buyer);
    enter_scenario_values(&form);

    assert!(form.select_role(Role::Seller));

    assert!(form.values().is_empty());
    match form.submit().await {
        SubmitResult::Invalid(errors) => {
            assert_eq!(errors.len(), 6);
            assert!(errors.contains(Field::SocietyName));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}
