//! # Certification Constraint Evaluation
//!
//! Evaluates certification constraints against participant agents built
//! from raw JSON claims, through the constraint function table:
//! - Satisfied and unsatisfied certification types
//! - Credentials presented next to loosely formed siblings
//! - Soft failures for malformed claims, reported as problems
//! - Unregistered left operands

use fx_policy::{
    CertificationTypeConstraintFunction, ConstraintFunctions, Operator, ParticipantAgent,
    ParticipantAgentPolicyContext, PolicyContext, Rule,
};
use fx_vc::ClaimsContext;
use serde_json::{json, Value};

const CERTIFICATION: &str = "https://w3id.org/factoryx/policy/Certification";

fn functions() -> ConstraintFunctions<ParticipantAgentPolicyContext> {
    ConstraintFunctions::new().with(CertificationTypeConstraintFunction::new())
}

fn agent_context(claims: Value) -> ParticipantAgentPolicyContext {
    let claims: ClaimsContext = serde_json::from_value(claims).unwrap();
    ParticipantAgentPolicyContext::new(
        ParticipantAgent::new(claims, Default::default()).with_identity("did:web:consumer.example.com"),
    )
}

fn certificate(certification_type: &str) -> Value {
    json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "type": ["VerifiableCredential", "https://w3id.org/factoryx/credentials/CertificationCredential"],
        "issuer": {"id": "did:web:issuer.example.com"},
        "issuanceDate": "2025-03-01T00:00:00Z",
        "credentialSubject": {
            "id": "did:web:consumer.example.com",
            "certificationType": certification_type
        }
    })
}

// ---------------------------------------------------------------------------
// 1. Matching
// ---------------------------------------------------------------------------

#[test]
fn matching_certification_type_satisfies_constraint() {
    let mut ctx = agent_context(json!({"vc": [certificate("ACertificateType")]}));
    let rule = Rule::permission("use");

    assert!(functions().evaluate(
        &json!(CERTIFICATION),
        Operator::Eq,
        &json!("ACertificateType"),
        Some(&rule),
        &mut ctx
    ));
    assert!(!ctx.has_problems());
}

#[test]
fn other_certification_type_is_not_satisfied() {
    let mut ctx = agent_context(json!({"vc": [certificate("ACertificateType")]}));

    assert!(!functions().evaluate(
        &json!(CERTIFICATION),
        Operator::Eq,
        &json!("invalid"),
        None,
        &mut ctx
    ));
    assert!(!ctx.has_problems());
}

#[test]
fn any_of_several_credentials_may_satisfy() {
    let mut ctx = agent_context(json!({
        "vc": [certificate("ISO9001"), certificate("ISO27001")]
    }));
    assert!(functions().evaluate(
        &json!(CERTIFICATION),
        Operator::Eq,
        &json!("ISO27001"),
        None,
        &mut ctx
    ));
}

#[test]
fn loosely_formed_siblings_do_not_block_matching() {
    let mut ctx = agent_context(json!({
        "vc": [
            certificate("ACertificateType"),
            {
                "type": ["VerifiableCredential", "https://w3id.org/factoryx/credentials/BogusCredential"],
                "issuer": "did:web:issuer.example.com",
                "issuanceDate": "2025-03-01T00:00:00",
                "credentialSubject": {"id": "did:web:consumer.example.com"}
            },
            {
                "type": ["VerifiableCredential"],
                "credentialSubject": {"id": "did:web:consumer.example.com"}
            }
        ]
    }));

    assert!(functions().evaluate(
        &json!(CERTIFICATION),
        Operator::Eq,
        &json!("ACertificateType"),
        None,
        &mut ctx
    ));
    assert!(!ctx.has_problems());
}

// ---------------------------------------------------------------------------
// 2. Soft failures
// ---------------------------------------------------------------------------

#[test]
fn malformed_vc_claim_degrades_to_false() {
    let mut ctx = agent_context(json!({"vc": "not-a-list"}));

    assert!(!functions().evaluate(
        &json!(CERTIFICATION),
        Operator::Eq,
        &json!("ACertificateType"),
        None,
        &mut ctx
    ));
    assert_eq!(
        ctx.problems(),
        ["ParticipantAgent contains a 'vc' claim, but the type is incorrect. Expected array of VerifiableCredential, received string.".to_string()]
    );
}

#[test]
fn each_failed_evaluation_reports_one_problem() {
    let functions = functions();
    let mut ctx = agent_context(json!({"vc": []}));

    assert!(!functions.evaluate(&json!(CERTIFICATION), Operator::Neq, &json!("x"), None, &mut ctx));
    assert!(!functions.evaluate(&json!(CERTIFICATION), Operator::Eq, &json!(7), None, &mut ctx));
    assert!(!functions.evaluate(&json!(CERTIFICATION), Operator::Eq, &json!("x"), None, &mut ctx));
    assert_eq!(ctx.problems().len(), 3);
}

#[test]
fn unregistered_left_operand_is_reported() {
    let mut ctx = agent_context(json!({"vc": [certificate("ACertificateType")]}));

    assert!(!functions().evaluate(
        &json!("https://w3id.org/factoryx/policy/Membership"),
        Operator::Eq,
        &json!("active"),
        None,
        &mut ctx
    ));
    assert_eq!(
        ctx.problems(),
        ["No constraint function registered for left operand 'https://w3id.org/factoryx/policy/Membership'".to_string()]
    );
}
