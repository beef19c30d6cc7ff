use jsonify_codec::{
    operation_codec, Add, CodecBuilder, ConfigError, DecodeError, Decrement, Increment, Operation,
    OperationCodec, OperationKind, Substract, VariantKind,
};
use jsonify_value::{parse, JsonKind, ParseErrorKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

fn codec() -> OperationCodec {
    operation_codec().expect("operation codec")
}

fn random_operation(rng: &mut StdRng) -> Operation {
    match rng.gen_range(0..4) {
        0 => Add {
            left: rng.gen(),
            right: rng.gen(),
        }
        .into(),
        1 => Substract {
            left: rng.gen(),
            right: rng.gen(),
        }
        .into(),
        2 => Increment { operand: rng.gen() }.into(),
        _ => Decrement { operand: rng.gen() }.into(),
    }
}

#[test]
fn decode_examples_matrix() {
    let codec = codec();
    let cases = [
        (
            r#"{"op":"add","left":1,"right":2}"#,
            Operation::Add(Add { left: 1, right: 2 }),
        ),
        (
            r#"{"op":"sub","left":-4,"right":9}"#,
            Operation::Substract(Substract { left: -4, right: 9 }),
        ),
        (
            r#"{"op":"inc","operand":3}"#,
            Operation::Increment(Increment { operand: 3 }),
        ),
        (
            r#"{"op":"dec","operand":-7}"#,
            Operation::Decrement(Decrement { operand: -7 }),
        ),
        // discriminator need not come first
        (
            r#"{"left":1,"right":2,"op":"add"}"#,
            Operation::Add(Add { left: 1, right: 2 }),
        ),
        (
            "\n{\n \"op\" : \"add\",\n \"left\" : 1,\n \"right\" : 2\n}\n",
            Operation::Add(Add { left: 1, right: 2 }),
        ),
        // integral floats coerce
        (
            r#"{"op":"inc","operand":3.0}"#,
            Operation::Increment(Increment { operand: 3 }),
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(codec.decode(text), Ok(expected), "text {text}");
    }
}

#[test]
fn encode_examples_matrix() {
    let codec = codec();
    let cases = [
        (
            Operation::Increment(Increment { operand: 3 }),
            r#"{"op":"inc","operand":3}"#,
        ),
        (
            Operation::Add(Add { left: 1, right: 2 }),
            r#"{"op":"add","left":1,"right":2}"#,
        ),
        (
            Operation::Substract(Substract {
                left: i64::MIN,
                right: i64::MAX,
            }),
            r#"{"op":"sub","left":-9223372036854775808,"right":9223372036854775807}"#,
        ),
        (
            Operation::Decrement(Decrement { operand: 0 }),
            r#"{"op":"dec","operand":0}"#,
        ),
    ];
    for (op, expected) in cases {
        assert_eq!(codec.encode(&op).as_deref(), Ok(expected));
    }
}

#[test]
fn encoded_output_matches_serde_json_view() {
    let codec = codec();
    let text = codec
        .encode(&Operation::Add(Add { left: 1, right: 2 }))
        .unwrap();
    let view: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(view, json!({"op": "add", "left": 1, "right": 2}));
    let keys: Vec<&String> = view.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["op", "left", "right"]);
}

#[test]
fn random_operations_round_trip() {
    let codec = codec();
    let mut rng = StdRng::seed_from_u64(0x0b5);
    for _ in 0..500 {
        let op = random_operation(&mut rng);
        assert_eq!(codec.decode(&codec.encode(&op).unwrap()), Ok(op));
    }
}

#[test]
fn reencoding_keeps_tag_and_declared_fields() {
    let codec = codec();
    let inputs = [
        r#"{"right":2,"extra":[1],"op":"add","left":1}"#,
        r#"{"operand":5,"op":"dec","note":"x"}"#,
    ];
    for text in inputs {
        let original = parse(text).unwrap();
        let reencoded = codec.encode_value(&codec.decode(text).unwrap()).unwrap();
        let object = reencoded.as_object().unwrap();
        assert_eq!(object.get_index(0).map(|(k, _)| k.as_str()), Some("op"));
        for (key, value) in object {
            assert_eq!(original.get(key), Some(value), "field {key}");
        }
        assert!(reencoded.get("extra").is_none() && reencoded.get("note").is_none());
    }
}

#[test]
fn tags_are_injective() {
    let codec = codec();
    let tags: Vec<&str> = codec.tags().collect();
    for (i, a) in tags.iter().enumerate() {
        for b in &tags[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(tags.len(), OperationKind::ALL.len());
}

#[test]
fn shared_tag_is_a_config_error() {
    let err = CodecBuilder::<Operation>::new("op")
        .variant::<Add>("add")
        .variant::<Substract>("add")
        .variant::<Increment>("inc")
        .variant::<Decrement>("dec")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateTag {
            tag: "add".into(),
            first: "Add".into(),
            second: "Substract".into(),
        }
    );
}

#[test]
fn discriminator_named_like_a_field_is_a_config_error() {
    let err = CodecBuilder::<Operation>::new("left")
        .variant::<Add>("add")
        .variant::<Substract>("sub")
        .variant::<Increment>("inc")
        .variant::<Decrement>("dec")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DiscriminatorCollision {
            tag: "add".into(),
            field: "left".into(),
        }
    );

    // a name no variant declares round-trips
    let codec = CodecBuilder::<Operation>::new("kind")
        .variant::<Add>("add")
        .variant::<Substract>("sub")
        .variant::<Increment>("inc")
        .variant::<Decrement>("dec")
        .build()
        .unwrap();
    let add = Operation::Add(Add { left: 1, right: 2 });
    let text = codec.encode(&add).unwrap();
    assert_eq!(text, r#"{"kind":"add","left":1,"right":2}"#);
    assert_eq!(codec.decode(&text), Ok(add));
}

#[test]
fn missing_variant_is_a_config_error() {
    let err = CodecBuilder::<Operation>::new("op")
        .variant::<Add>("add")
        .variant::<Substract>("sub")
        .variant::<Increment>("inc")
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingVariant("Decrement".into()));
    assert_eq!(err.to_string(), "variant Decrement has no registered tag");
}

#[test]
fn decode_error_matrix() {
    let codec = codec();
    let cases: Vec<(&str, DecodeError)> = vec![
        (
            r#"{"op":"mul","x":1}"#,
            DecodeError::UnknownVariant("mul".into()),
        ),
        (r#"{"left":1,"right":2}"#, DecodeError::MissingDiscriminator),
        (
            r#"{"op":"inc","operand":"3"}"#,
            DecodeError::FieldTypeMismatch {
                field: "operand".into(),
                expected: JsonKind::Number,
                actual: JsonKind::String,
            },
        ),
        (
            r#"{"op":"add","left":1}"#,
            DecodeError::MissingField("right".into()),
        ),
        (
            r#"{"op":"add","left":null,"right":2}"#,
            DecodeError::FieldTypeMismatch {
                field: "left".into(),
                expected: JsonKind::Number,
                actual: JsonKind::Null,
            },
        ),
        (
            r#"{"op":"dec","operand":1.5}"#,
            DecodeError::InvalidInteger("operand".into()),
        ),
        (
            r#"{"op":"dec","operand":18446744073709551616}"#,
            DecodeError::InvalidInteger("operand".into()),
        ),
        (
            r#"{"op":["add"]}"#,
            DecodeError::InvalidDiscriminator(JsonKind::Array),
        ),
        (
            r#"{"op":"ADD","left":1,"right":2}"#,
            DecodeError::UnknownVariant("ADD".into()),
        ),
        (
            r#"[{"op":"add","left":1,"right":2}]"#,
            DecodeError::ShapeMismatch {
                expected: JsonKind::Object,
                actual: JsonKind::Array,
            },
        ),
        (
            "42",
            DecodeError::ShapeMismatch {
                expected: JsonKind::Object,
                actual: JsonKind::Number,
            },
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(codec.decode(text), Err(expected), "text {text}");
    }
}

#[test]
fn malformed_text_is_wrapped() {
    let codec = codec();
    match codec.decode(r#"{"op":"add","left":1,"right":2"#) {
        Err(DecodeError::Malformed(err)) => {
            assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
            assert_eq!(err.offset, 30);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        codec.decode(r#"{"op":"add","op":"sub","left":1,"right":2}"#),
        Err(DecodeError::Malformed(_))
    ));
}

#[test]
fn extra_fields_are_ignored() {
    let codec = codec();
    assert_eq!(
        codec.decode(r#"{"op":"add","left":1,"right":2,"extra":true}"#),
        Ok(Operation::Add(Add { left: 1, right: 2 }))
    );
    assert_eq!(
        codec.decode(r#"{"op":"inc","operand":3,"left":{"deep":[1,2]}}"#),
        Ok(Operation::Increment(Increment { operand: 3 }))
    );
}

#[test]
fn batch_decode_matrix() {
    let codec = codec();
    let text = r#"[
        {"op":"add","left":1,"right":2},
        {"op":"inc","operand":3}
    ]"#;
    assert_eq!(
        codec.decode_all(text),
        Ok(vec![
            Operation::Add(Add { left: 1, right: 2 }),
            Operation::Increment(Increment { operand: 3 }),
        ])
    );
    assert_eq!(codec.decode_all("[]"), Ok(vec![]));
}

#[test]
fn batch_decode_is_all_or_nothing() {
    let codec = codec();
    assert_eq!(
        codec.decode_all(r#"[{"op":"add","left":1,"right":2},{"op":"bogus"}]"#),
        Err(DecodeError::UnknownVariant("bogus".into()))
    );
    assert_eq!(
        codec.decode_all(r#"[{"op":"inc","operand":1},{"op":"inc"},{"op":"nope"}]"#),
        Err(DecodeError::MissingField("operand".into()))
    );
    assert_eq!(
        codec.decode_all(r#"[{"op":"inc","operand":1},"inc"]"#),
        Err(DecodeError::ShapeMismatch {
            expected: JsonKind::Object,
            actual: JsonKind::String,
        })
    );
    assert_eq!(
        codec.decode_all(r#"{"op":"inc","operand":1}"#),
        Err(DecodeError::ShapeMismatch {
            expected: JsonKind::Array,
            actual: JsonKind::Object,
        })
    );
}

#[test]
fn batch_encode_round_trips() {
    let codec = codec();
    let mut rng = StdRng::seed_from_u64(7);
    let ops: Vec<Operation> = (0..32).map(|_| random_operation(&mut rng)).collect();
    let text = codec.encode_all(&ops).unwrap();
    assert_eq!(codec.decode_all(&text), Ok(ops));
    assert_eq!(codec.encode_all(&[]).as_deref(), Ok("[]"));
}

#[test]
fn codec_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OperationCodec>();

    let codec = codec();
    std::thread::scope(|scope| {
        for seed in 0..4u64 {
            let codec = &codec;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..200 {
                    let op = random_operation(&mut rng);
                    assert_eq!(codec.decode(&codec.encode(&op).unwrap()), Ok(op));
                }
            });
        }
    });
}

#[test]
fn decode_error_messages() {
    let codec = codec();
    let message = |text: &str| codec.decode(text).unwrap_err().to_string();
    assert_eq!(message(r#"{"op":"mul"}"#), "unknown variant tag `mul`");
    assert_eq!(message(r#"{"x":1}"#), "missing discriminator field");
    assert_eq!(
        message(r#"{"op":"inc","operand":"3"}"#),
        "field `operand`: expected number, found string"
    );
    assert_eq!(message("[1"), "malformed JSON: invalid JSON at byte 2: unexpected end of input");
}
