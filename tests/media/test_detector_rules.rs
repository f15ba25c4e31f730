// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Media detection per rule and across rule tables

use mac_arti::media::rules::{
    BRYCE_WORK, EIELSON_WORK, FLORES_WORK, LOPEZ_ANTAY_WORK, MUSEUM_MAP, USAGE_GUIDE,
};
use mac_arti::media::{MediaAsset, MediaDetector, ENTITY_TABLE};
use std::collections::HashSet;

fn detector() -> MediaDetector {
    MediaDetector::new().unwrap()
}

#[test]
fn test_fernando_bryce_single_reference() {
    let refs = detector().detect_media(
        "Cuéntame sobre Fernando Bryce",
        "Fernando Bryce creó el mundo en llamas, una obra de 95 dibujos de Bryce.",
    );
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0], BRYCE_WORK.to_reference());
}

#[test]
fn test_each_entity_key_detected() {
    let detector = detector();
    for (key, asset) in ENTITY_TABLE {
        let refs = detector.detect_media(&key.to_uppercase(), "");
        assert!(
            refs.contains(&asset.to_reference()),
            "key '{}' did not produce {:?}",
            key,
            asset
        );
    }
}

#[test]
fn test_pattern_rules_per_work() {
    let cases: [(&str, MediaAsset); 4] = [
        ("La escultura de López Antay", LOPEZ_ANTAY_WORK),
        ("the painting by Flores", FLORES_WORK),
        ("instalacion de Eielson", EIELSON_WORK),
        ("Which work is by Bryce?", BRYCE_WORK),
    ];
    let detector = detector();
    for (message, asset) in cases {
        assert_eq!(
            detector.detect_media(message, ""),
            vec![asset.to_reference()],
            "{}",
            message
        );
    }
}

#[test]
fn test_map_pattern_across_message_and_reply() {
    let refs = detector().detect_media("¿En qué sala está?", "Está en el segundo piso del museo.");
    assert_eq!(refs, vec![MUSEUM_MAP.to_reference()]);
}

#[test]
fn test_usage_keyword_and_map_together() {
    let refs = detector().detect_media(
        "¿Cómo te uso?",
        "Revisa la guía LABEL y el mapa del museo.",
    );
    assert_eq!(refs, vec![MUSEUM_MAP.to_reference(), USAGE_GUIDE.to_reference()]);
}

#[test]
fn test_output_has_no_duplicates() {
    let detector = detector();
    let texts = [
        "Bryce bryce BRYCE el mundo en llamas obra de Bryce",
        "mapa map museo museum ¿dónde? sala room",
        "Sara Flores, shao kené, shao kene, pintura de flores",
        "eielson vertical celeste lópez antay retablo ayacuchano label",
    ];
    for message in texts {
        for reply in texts {
            let refs = detector.detect_media(message, reply);
            let unique: HashSet<_> = refs.iter().cloned().collect();
            assert_eq!(unique.len(), refs.len());
        }
    }
}

#[test]
fn test_custom_rules() {
    let asset = MediaAsset {
        kind: "obra",
        asset_id: "obra-test",
        label: "Prueba",
    };
    let detector =
        MediaDetector::with_rules(vec![("prueba", asset)], vec![(r"(obra).*\bx\b".to_string(), asset)])
            .unwrap();
    assert_eq!(detector.detect_media("una prueba", "").len(), 1);
    assert_eq!(detector.detect_media("obra de X", "").len(), 1);
    assert!(detector.detect_media("nada", "").is_empty());
}

#[test]
fn test_invalid_pattern_rejected() {
    assert!(MediaDetector::with_rules(vec![], vec![("(unclosed".to_string(), MUSEUM_MAP)]).is_err());
}
