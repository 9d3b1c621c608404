//! Document resolution integration tests
//!
//! Exercises the three document shapes end to end, from YAML bytes to the
//! resolved specification and the certificate template.

use yaml_x509::{
    domain::{
        algorithm::{PublicKeyAlgorithm, SignatureAlgorithm},
        usage::{ExtKeyUsage, KeyUsageFlags},
    },
    template_from_yaml, CertificateSpec, ConfigDocument, ConvertWorkflow, FlagMergePolicy,
    TemplateError,
};

use x509_cert::ext::pkix::KeyUsages;

const SEGMENTED_SERVER: &[u8] = include_bytes!("../test-data/segmented_server.yaml");
const FLAT_CA: &[u8] = include_bytes!("../test-data/flat_ca.yaml");
const CONFIG_ONLY: &[u8] = include_bytes!("../test-data/config_only.yaml");

/// Segment and merge documents
mod segmented_documents {
    use super::*;

    #[test]
    fn test_three_document_scenario() {
        let yaml = br#"
segments:
  defaults:
    key_usage: [digital_signature]
  web:
    key_usage: [key_encipherment]
merge: [defaults, web]
config:
  key_usage: []
"#;
        let spec = ConvertWorkflow::default().resolve(yaml).expect("resolves");
        assert_eq!(spec.key_usage, vec!["digital_signature", "key_encipherment"]);
    }

    #[test]
    fn test_segmented_server_fixture() {
        let spec = ConvertWorkflow::default()
            .resolve(SEGMENTED_SERVER)
            .expect("resolves");

        assert_eq!(spec.serial_number, "1234567890");
        assert_eq!(spec.subject["common_name"], "www.example.com");
        assert_eq!(spec.subject["organization"], "Example Corp");
        assert_eq!(spec.subject["country"], "US");
        assert_eq!(spec.issuer["common_name"], "Example Issuing CA");
        assert_eq!(
            spec.dns_names,
            vec!["example.com", "internal.example.com", "www.example.com"]
        );
        assert_eq!(spec.ip_addresses, vec!["10.0.0.10"]);
        assert_eq!(spec.signature_algorithm, "ECDSAWithSHA256");

        let template = template_from_yaml(SEGMENTED_SERVER).expect("builds");
        assert_eq!(
            template.key_usage,
            KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment
        );
        assert_eq!(template.ext_key_usage, vec![ExtKeyUsage::ServerAuth]);
        assert_eq!(template.signature_algorithm, SignatureAlgorithm::EcdsaWithSha256);
        assert_eq!(template.public_key_algorithm, PublicKeyAlgorithm::Ecdsa);
        assert!(!template.is_ca);
        assert!(template.not_before < template.not_after);

        let summary = template.summary();
        assert!(summary.subject.to_lowercase().contains("cn=www.example.com"));
        assert_eq!(summary.serial_number.as_deref(), Some("1234567890"));
        assert_eq!(summary.ext_key_usage, vec!["server_auth"]);
    }

    #[test]
    fn test_missing_segment_fails_closed() {
        let yaml = br#"
segments:
  existing:
    serial_number: "1"
merge: [existing, missing]
config:
  serial_number: "2"
"#;
        let err = ConvertWorkflow::default().resolve(yaml).unwrap_err();
        assert_eq!(err.missing_segment(), Some("missing"));
        assert_eq!(
            err.to_string(),
            "segment 'missing' referenced in merge but not defined"
        );
        assert!(matches!(template_from_yaml(yaml), Err(TemplateError::MissingSegment(_))));
    }

    #[test]
    fn test_empty_merge_without_config() {
        let yaml = b"segments:\n  unused:\n    serial_number: \"1\"\nmerge: []\n";
        let spec = ConvertWorkflow::default().resolve(yaml).expect("resolves");
        assert_eq!(spec, CertificateSpec::default());
    }

    #[test]
    fn test_segment_order_follows_merge_not_table() {
        let yaml = br#"
segments:
  a:
    serial_number: "100"
    dns_names: [a.example]
  b:
    serial_number: "200"
    dns_names: [b.example]
merge: [b, a]
"#;
        let spec = ConvertWorkflow::default().resolve(yaml).expect("resolves");
        assert_eq!(spec.serial_number, "100");
        assert_eq!(spec.dns_names, vec!["b.example", "a.example"]);
    }

    #[test]
    fn test_flag_policies_differ_on_unset_flags() {
        let yaml = br#"
segments:
  ca:
    is_ca: true
    basic_constraints_valid: true
    max_path_len: 0
    max_path_len_zero: true
  naming:
    subject:
      common_name: Intermediate
merge: [ca, naming]
"#;
        let overwrite = template_from_yaml(yaml).expect("builds");
        assert!(!overwrite.is_ca);
        assert!(!overwrite.basic_constraints_valid);
        assert_eq!(overwrite.path_len_constraint(), None);

        let when_present = ConvertWorkflow::new(FlagMergePolicy::WhenPresent)
            .run(yaml)
            .expect("builds");
        assert!(when_present.is_ca);
        assert!(when_present.basic_constraints_valid);
        assert_eq!(when_present.path_len_constraint(), Some(0));
        assert_eq!(when_present.subject.common_name, "Intermediate");
    }
}

/// Flat and config-only documents
mod single_layer_documents {
    use super::*;

    #[test]
    fn test_flat_ca_fixture() {
        let template = template_from_yaml(FLAT_CA).expect("builds");
        assert!(template.is_ca);
        assert!(template.basic_constraints_valid);
        assert_eq!(template.path_len_constraint(), Some(1));
        assert_eq!(template.key_usage, KeyUsages::KeyCertSign | KeyUsages::CRLSign);
        assert_eq!(template.signature_algorithm, SignatureAlgorithm::Sha384WithRsa);
        assert_eq!(template.subject, template.issuer);

        let extensions = template.extensions().expect("encodes");
        assert_eq!(extensions.len(), 2);
        assert!(extensions.iter().all(|e| e.critical));
    }

    #[test]
    fn test_flat_document_matches_direct_parse() {
        let via_workflow = ConvertWorkflow::default().resolve(FLAT_CA).expect("resolves");
        let direct = CertificateSpec::from_yaml_slice(FLAT_CA).expect("parses");
        assert_eq!(via_workflow, direct);
        assert!(!ConfigDocument::from_yaml_slice(FLAT_CA)
            .expect("parses")
            .uses_segments());
    }

    #[test]
    fn test_config_only_fixture() {
        let template = template_from_yaml(CONFIG_ONLY).expect("builds");
        assert_eq!(template.subject.common_name, "client.example.com");
        assert_eq!(template.ext_key_usage, vec![ExtKeyUsage::ClientAuth]);
        assert_eq!(template.email_addresses, vec!["ops@example.com"]);
        assert_eq!(template.uris.len(), 1);
        assert_eq!(template.uris[0].scheme(), "spiffe");
        assert!(template.key_usage.is_empty());
    }

    #[test]
    fn test_lenient_scalars() {
        let yaml = br#"
serial_number: 98765
subject:
  common_name: 12345
  postal_code: 94102
dns_names: [1234, example.com]
"#;
        let spec = ConvertWorkflow::default().resolve(yaml).expect("resolves");
        assert_eq!(spec.serial_number, "98765");
        assert_eq!(spec.subject["common_name"], "12345");
        assert_eq!(spec.dns_names, vec!["1234", "example.com"]);

        let template = template_from_yaml(yaml).expect("builds");
        assert_eq!(template.subject.postal_code, vec!["94102"]);
    }

    #[test]
    fn test_long_unquoted_serial_number() {
        let yaml = b"serial_number: 123456789012345678901234567890\nsubject:\n  common_name: 1.10\n";
        let spec = ConvertWorkflow::default().resolve(yaml).expect("resolves");
        assert_eq!(spec.serial_number, "123456789012345678901234567890");
        assert_eq!(spec.subject["common_name"], "1.10");

        let template = template_from_yaml(yaml).expect("builds");
        assert_eq!(
            template.summary().serial_number.as_deref(),
            Some("123456789012345678901234567890")
        );
        assert!(template.serial_number_der().expect("encodes").is_some());
    }

    #[test]
    fn test_null_document_builds_default_template() {
        let template = template_from_yaml(b"~\n").expect("builds");
        assert_eq!(template, template_from_yaml(b"").expect("builds"));
    }

    #[test]
    fn test_unparseable_values_do_not_fail() {
        let yaml = br#"
serial_number: twelve
not_before: soon
ip_addresses: [not-an-ip, "2001:db8::1"]
uris: ["::not a uri::"]
signature_algorithm: sha256withrsa
key_usage: [digital_signature, teleport]
"#;
        let template = template_from_yaml(yaml).expect("builds");
        assert_eq!(template.serial_number, None);
        assert_eq!(template.not_before, None);
        assert_eq!(template.ip_addresses.len(), 1);
        assert!(template.uris.is_empty());
        assert_eq!(template.signature_algorithm, SignatureAlgorithm::Unknown);
        assert_eq!(template.key_usage, KeyUsageFlags::from(KeyUsages::DigitalSignature));
    }

    #[test]
    fn test_malformed_yaml_is_propagated() {
        let err = template_from_yaml(b"subject: [a, b").unwrap_err();
        assert!(matches!(err, TemplateError::DocumentError(_)));
    }
}
