use rust_decimal_macros::dec;

use twinfield_rs::{Error, LineField, LineType, TransactionLine, allowed_fields};

const ALL_TYPES: [LineType; 3] = [LineType::Total, LineType::Detail, LineType::Vat];

#[test]
fn vat_code_is_rejected_outside_detail_and_vat_lines() {
    for line_type in ALL_TYPES {
        let mut line = TransactionLine::new(line_type);
        let result = line.set_vat_code(Some("VH".to_string())).map(|_| ());

        match line_type {
            LineType::Detail | LineType::Vat => assert!(result.is_ok(), "{line_type} rejected vat code"),
            LineType::Total => {
                let err = result.unwrap_err();
                assert!(err.is_validation());
                assert!(matches!(
                    err,
                    Error::InvalidFieldForLineType {
                        field: LineField::VatCode,
                        line_type: LineType::Total,
                    }
                ));
                assert_eq!(line.vat_code(), None);
            }
        }
    }
}

#[test]
fn clearing_conditional_fields_never_fails() {
    for line_type in ALL_TYPES {
        let mut line = TransactionLine::new(line_type);
        assert!(line.set_vat_code(None).is_ok());
        assert!(line.set_vat_value(None).is_ok());
    }
}

#[test]
fn detail_lines_take_both_vat_fields() {
    let mut line = TransactionLine::new(LineType::Detail);
    line.set_vat_code(Some("VH".to_string()))
        .unwrap()
        .set_vat_value(Some(dec!(21.00)))
        .unwrap();

    assert_eq!(line.vat_code(), Some("VH"));
    assert_eq!(line.vat_value(), Some(dec!(21.00)));
}

#[test]
fn vat_lines_take_a_code_but_no_amount() {
    let mut line = TransactionLine::new(LineType::Vat);
    assert!(line.set_vat_code(Some("VH".to_string())).is_ok());

    let err = line.set_vat_value(Some(dec!(21.00))).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidFieldForLineType {
            field: LineField::VatValue,
            line_type: LineType::Vat,
        }
    ));
    assert_eq!(line.vat_value(), None);
}

#[test]
fn setters_agree_with_the_legality_table() {
    for line_type in ALL_TYPES {
        let allowed = allowed_fields(line_type);
        let mut line = TransactionLine::new(line_type);

        assert_eq!(
            line.set_vat_code(Some("VL".to_string())).is_ok(),
            allowed.contains(&LineField::VatCode)
        );
        assert_eq!(
            line.set_vat_value(Some(dec!(1))).is_ok(),
            allowed.contains(&LineField::VatValue)
        );
    }
}

#[test]
fn switching_to_a_stricter_type_keeps_the_line_intact() {
    let mut line = TransactionLine::new(LineType::Detail);
    line.set_vat_code(Some("VH".to_string()))
        .unwrap()
        .set_vat_value(Some(dec!(21)))
        .unwrap();

    assert!(line.set_line_type(LineType::Vat).is_err());
    assert!(line.set_line_type(LineType::Total).is_err());
    assert_eq!(line.line_type(), LineType::Detail);
    assert_eq!(line.vat_value(), Some(dec!(21)));

    line.set_vat_value(None).unwrap();
    line.set_line_type(LineType::Vat).unwrap();
    assert_eq!(line.line_type(), LineType::Vat);
    assert_eq!(line.vat_code(), Some("VH"));
}

#[test]
fn calculated_amounts_start_empty() {
    let line = TransactionLine::new(LineType::Detail);
    assert_eq!(line.base_value(), None);
    assert_eq!(line.rate(), None);
    assert_eq!(line.rep_value(), None);
    assert_eq!(line.rep_rate(), None);
    assert_eq!(line.base_value_open(), None);
}
