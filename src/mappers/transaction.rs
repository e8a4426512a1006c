use super::{code, date, office, parse, required_child, text};
use crate::{
    entities::{DebitCredit, Destiny, LineType, Transaction, TransactionLine},
    error::{Error, Result, malformed},
    response::Response,
    xml::Element,
};

/// Maps `transaction` responses into [`Transaction`]s.
pub struct TransactionMapper;

impl TransactionMapper {
    /// Maps the first transaction of the response.
    pub fn map(response: &Response) -> Result<Transaction> {
        Self::map_all(response)?
            .into_iter()
            .next()
            .ok_or(Error::NotFound {
                entity: "Transaction",
            })
    }

    pub fn map_all(response: &Response) -> Result<Vec<Transaction>> {
        let root = response.root();
        match root.name() {
            "transaction" => Ok(vec![Self::map_transaction(root)?]),
            "transactions" => root
                .children_named("transaction")
                .map(Self::map_transaction)
                .collect(),
            other => Err(malformed(format!("unexpected root element <{other}> for transactions"))),
        }
    }

    fn map_transaction(element: &Element) -> Result<Transaction> {
        let header = required_child(element, "transaction", "header")?;

        // Read responses report where the transaction lives, write documents where it should go.
        let destiny = element
            .attribute("location")
            .or_else(|| element.attribute("destiny"))
            .map(str::parse::<Destiny>)
            .transpose()?
            .unwrap_or(Destiny::Temporary);
        let raise_warning = element
            .attribute("raisewarning")
            .map(|value| {
                value.parse().map_err(|_| Error::InvalidValue {
                    field: "raisewarning",
                    value: value.to_string(),
                })
            })
            .transpose()?;

        let lines = match element.child("lines") {
            Some(lines) => lines
                .children_named("line")
                .map(Self::map_line)
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };

        Ok(Transaction {
            office: office(header),
            code: text(header, "code"),
            number: text(header, "number"),
            currency: text(header, "currency"),
            date: date(header, "date")?,
            period: text(header, "period"),
            destiny,
            raise_warning,
            lines,
        })
    }

    fn map_line(element: &Element) -> Result<TransactionLine> {
        let line_type: LineType = element
            .attribute("type")
            .ok_or(Error::MissingField {
                entity: "transaction line",
                field: "type",
            })?
            .parse()?;

        let mut line = TransactionLine::new(line_type);
        line.set_id(element.attribute("id").map(str::to_string))
            .set_dim1(text(element, "dim1"))
            .set_dim2(text(element, "dim2"))
            .set_description(text(element, "description"))
            .set_match_status(parse(element, "matchstatus")?)
            .set_match_level(parse(element, "matchlevel")?);
        line.set_vat_code(code(element, "vatcode"))?
            .set_vat_value(parse(element, "vatvalue")?)?;

        let debit_credit: Option<DebitCredit> = parse(element, "debitcredit")?;
        line.value_fields_mut()
            .set_raw(debit_credit.unwrap_or_default(), parse(element, "value")?);

        let amounts = line.amounts_mut();
        amounts.set_base_value(parse(element, "basevalue")?);
        amounts.set_rate(parse(element, "rate")?);
        amounts.set_rep_value(parse(element, "repvalue")?);
        amounts.set_rep_rate(parse(element, "reprate")?);
        amounts.set_base_value_open(parse(element, "basevalueopen")?);

        Ok(line)
    }
}
