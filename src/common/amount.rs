// src/common/amount.rs

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use serde::Deserialize;
use utoipa::ToSchema;

/// Valor monetário vindo do cliente: aceita tanto `"5000"` quanto `5000`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl AmountInput {
    /// Representação textual, usada nos campos guardados como texto livre
    /// (ex: `totalAmount`). Texto em branco vira `None`.
    pub fn into_text(self) -> Option<String> {
        match self {
            AmountInput::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            AmountInput::Number(n) => n.is_finite().then(|| n.to_string()),
        }
    }

    /// Conversão estrita para `Decimal`. Separadores de milhar (`,`) são
    /// ignorados; qualquer outro lixo invalida o valor.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            AmountInput::Text(text) => {
                let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return None;
                }
                Decimal::from_str(&cleaned)
                    .or_else(|_| Decimal::from_scientific(&cleaned))
                    .ok()
            }
            AmountInput::Number(n) => Decimal::from_f64(*n),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(text) if text.trim().is_empty())
    }
}

/// Lê o número do início de um texto livre, como "12.5kg" -> 12.5.
///
/// Mesma leitura do `parseFloat` do cliente: espaços iniciais são ignorados,
/// aceita sinal, dígitos, parte decimal e expoente (`1e3`). Vírgula encerra
/// o número (`"1,200円"` -> 1). Valores além do alcance de `Decimal` saturam
/// em `Decimal::MAX`/`MIN`. Devolve `None` quando não há número no começo.
pub fn parse_leading_decimal(text: &str) -> Option<Decimal> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let saturated = if negative { Decimal::MIN } else { Decimal::MAX };
    if rest.starts_with("Infinity") {
        return Some(saturated);
    }

    let bytes = rest.as_bytes();
    let digits_from = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_len = digits_from(0);
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = digits_from(end + 1);
        end += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    let mut literal = String::with_capacity(end + 8);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_len == 0 { "0" } else { &rest[..int_len] });
    if frac_len > 0 {
        literal.push('.');
        literal.push_str(&rest[int_len + 1..int_len + 1 + frac_len]);
    }

    // Expoente só conta se vier ao menos um dígito depois do `e`.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_len = digits_from(end + 1 + sign_len);
        if exp_len > 0 {
            literal.push('e');
            literal.push_str(&rest[end + 1..end + 1 + sign_len + exp_len]);
        }
    }

    if let Ok(exact) = Decimal::from_str(&literal).or_else(|_| Decimal::from_scientific(&literal)) {
        return Some(exact);
    }

    // Fora do alcance exato: aproxima por f64 e satura.
    let approx: f64 = literal.parse().ok()?;
    Some(Decimal::from_f64(approx).unwrap_or(if approx.abs() < 1.0 {
        Decimal::ZERO
    } else {
        saturated
    }))
}

/// Arredonda para a unidade inteira mais próxima; meio arredonda para cima
/// (o mesmo que `Math.round` do cliente: -2.5 -> -2). Nunca estoura.
pub fn round_to_unit(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}
