use hypcert_core::provenance::{CertificateProvenance, SchemaVersion};

#[test]
fn provenance_round_trip_json() {
    let provenance = CertificateProvenance {
        schema_version: SchemaVersion::new(1, 0, 0),
        triangulation: "m004".into(),
        triangulation_hash: "abc".into(),
        precision_bits: 53,
        tolerance: 0.1,
        tool_versions: [("hypcert-core".into(), "0.1.0".into())]
            .into_iter()
            .collect(),
    };

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: CertificateProvenance = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, provenance);
    assert_eq!(SchemaVersion::default(), SchemaVersion::new(1, 0, 0));
}
