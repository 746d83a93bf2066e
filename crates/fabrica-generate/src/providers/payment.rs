use serde_json::Value;

use fabrica_core::FieldValue;

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{CardType, Provider, no_such_method};
use crate::random::RandomStream;

const METHODS: &[&str] = &[
    "credit_card_number",
    "credit_card_expiration_date",
    "cvv",
    "paypal",
];

const CARD_PARAMS: &[ParamSpec] = &[ParamSpec::new("card_type", ParamKind::String)];
const EXPIRATION_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("minimum", ParamKind::Int),
    ParamSpec::new("maximum", ParamKind::Int),
];

/// Payment data. Locale independent: card layouts do not vary by locale.
pub struct PaymentProvider;

impl PaymentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for PaymentProvider {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    fn call(
        &mut self,
        method: &str,
        params: Option<&Value>,
        random: &mut RandomStream,
    ) -> Result<FieldValue> {
        match method {
            "credit_card_number" => {
                let map = validate_params(params, CARD_PARAMS, "payment.credit_card_number")?;
                let card_type =
                    CardType::resolve(map.str("card_type"), "payment.credit_card_number", random)?;
                Ok(FieldValue::Text(card_number(card_type, random)))
            }
            "credit_card_expiration_date" => {
                let map = validate_params(
                    params,
                    EXPIRATION_PARAMS,
                    "payment.credit_card_expiration_date",
                )?;
                let minimum = map.i64("minimum").unwrap_or(26);
                let maximum = map.i64("maximum").unwrap_or(31);
                let month = random.randint(1, 12);
                let year = random.randint(minimum, maximum);
                Ok(FieldValue::Text(format!("{month:02}/{year:02}")))
            }
            "cvv" => Ok(FieldValue::Text(format!("{:03}", random.randint(0, 999)))),
            "paypal" => {
                let login = random.randstr(10).to_ascii_lowercase();
                Ok(FieldValue::Text(format!("{login}@paypal.com")))
            }
            other => Err(no_such_method("payment", other)),
        }
    }
}

fn card_number(card_type: CardType, random: &mut RandomStream) -> String {
    let (prefix, length) = match card_type {
        CardType::Visa => ("4".to_string(), 16),
        CardType::MasterCard => (format!("5{}", random.randint(1, 5)), 16),
        CardType::Amex => (format!("3{}", *random.choice(&['4', '7']).unwrap_or(&'4')), 15),
    };

    let mut digits: Vec<u8> = prefix
        .bytes()
        .map(|b| b - b'0')
        .collect();
    while digits.len() < length - 1 {
        digits.push(random.randint(0, 9) as u8);
    }
    digits.push(luhn_check_digit(&digits));

    digits.iter().map(|d| (d + b'0') as char).collect()
}

fn luhn_check_digit(digits: &[u8]) -> u8 {
    let mut sum = 0_u32;
    // Walk right to left; the check digit will sit at the (doubled) odd
    // position relative to the end.
    for (i, digit) in digits.iter().rev().enumerate() {
        let mut value = *digit as u32;
        if i % 2 == 0 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }
    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Seed;

    fn luhn_valid(number: &str) -> bool {
        let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, d)| {
                if i % 2 == 1 {
                    let doubled = d * 2;
                    if doubled > 9 { doubled - 9 } else { doubled }
                } else {
                    *d
                }
            })
            .sum();
        sum % 10 == 0
    }

    #[test]
    fn card_numbers_pass_luhn() {
        let mut random = RandomStream::new(Seed::Number(9));
        for card_type in CardType::ALL {
            for _ in 0..16 {
                let number = card_number(*card_type, &mut random);
                assert!(luhn_valid(&number), "{number} fails luhn");
            }
        }
    }

    #[test]
    fn card_prefixes_match_network() {
        let mut random = RandomStream::new(Seed::Number(10));
        let visa = card_number(CardType::Visa, &mut random);
        assert!(visa.starts_with('4'));
        assert_eq!(visa.len(), 16);
        let amex = card_number(CardType::Amex, &mut random);
        assert!(amex.starts_with("34") || amex.starts_with("37"));
        assert_eq!(amex.len(), 15);
    }
}
