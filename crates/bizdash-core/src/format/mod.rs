//! Locale-aware rendering of money, dates and ratios for display.
//!
//! The locale is fixed when a `Formatter` is built; nothing here reads
//! process-wide locale state.


use crate::{
    obs::sink::{self, MetricsEvent},
    types::{Date, Decimal},
};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;
use time::{format_description::BorrowedFormatItem, macros::format_description};

const DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");
const MONTH_DAY_YEAR: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");
const DOTTED_DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year]");

///
/// FormatError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FormatError {
    /// NaN, infinities, and magnitudes no decimal can hold.
    #[error("cannot format '{value}' as an amount")]
    InvalidInput { value: String },

    #[error("unknown locale '{tag}'")]
    UnknownLocale { tag: String },
}

///
/// Locale
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub const ALL: [Self; 4] = [Self::PtBr, Self::EnUs, Self::EnGb, Self::DeDe];

    /// BCP 47 tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
        }
    }

    const fn conventions(self) -> Conventions {
        match self {
            Self::PtBr => Conventions {
                currency_prefix: "R$\u{a0}",
                currency_suffix: "",
                percent_suffix: "%",
                group: '.',
                decimal: ',',
                date: DAY_MONTH_YEAR,
            },
            Self::EnUs => Conventions {
                currency_prefix: "$",
                currency_suffix: "",
                percent_suffix: "%",
                group: ',',
                decimal: '.',
                date: MONTH_DAY_YEAR,
            },
            Self::EnGb => Conventions {
                currency_prefix: "£",
                currency_suffix: "",
                percent_suffix: "%",
                group: ',',
                decimal: '.',
                date: DAY_MONTH_YEAR,
            },
            Self::DeDe => Conventions {
                currency_prefix: "",
                currency_suffix: "\u{a0}€",
                percent_suffix: "\u{a0}%",
                group: '.',
                decimal: ',',
                date: DOTTED_DAY_MONTH_YEAR,
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    /// Tags match case-insensitively; `_` is accepted for `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");

        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| FormatError::UnknownLocale { tag: s.to_string() })
    }
}

///
/// Conventions
/// Per-locale symbols and separators. Gaps between number and symbol
/// are non-breaking spaces.
///

#[derive(Clone, Copy)]
struct Conventions {
    currency_prefix: &'static str,
    currency_suffix: &'static str,
    percent_suffix: &'static str,
    group: char,
    decimal: char,
    date: &'static [BorrowedFormatItem<'static>],
}

///
/// Formatter
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Formatter {
    locale: Locale,
}

impl Formatter {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Render a floating-point amount as currency.
    ///
    /// Non-finite input is rejected rather than rendered as `NaN`.
    pub fn format_currency(&self, value: f64) -> Result<String, FormatError> {
        let amount = finite_decimal(value)?;

        Ok(self.format_amount(amount))
    }

    /// Render a decimal amount as currency, rounded half away from zero to
    /// two places.
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        let conv = self.locale.conventions();
        let (negative, number) = fixed_two(amount, conv.group, conv.decimal);
        let sign = if negative { "-" } else { "" };

        format!(
            "{sign}{}{number}{}",
            conv.currency_prefix, conv.currency_suffix
        )
    }

    /// Render a calendar date in the locale's numeric short form.
    #[must_use]
    pub fn format_date(&self, date: Date) -> String {
        date.get()
            .format(self.locale.conventions().date)
            .unwrap_or_else(|_| date.to_string())
    }

    /// Render a ratio (`0.125`) as a percentage (`12,5%`), with at most one
    /// fractional digit.
    pub fn format_percent(&self, ratio: f64) -> Result<String, FormatError> {
        let percent = finite_decimal(ratio)?
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        let conv = self.locale.conventions();
        let negative = percent.is_sign_negative() && !percent.is_zero();
        let digits = percent.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(whole, conv.group));
        if !fraction.is_empty() {
            out.push(conv.decimal);
            out.push_str(fraction);
        }
        out.push_str(conv.percent_suffix);

        Ok(out)
    }
}

fn finite_decimal(value: f64) -> Result<Decimal, FormatError> {
    let converted = if value.is_finite() {
        Decimal::try_from(value).ok()
    } else {
        None
    };

    converted.ok_or_else(|| {
        sink::record(MetricsEvent::FormatRejected);

        FormatError::InvalidInput {
            value: value.to_string(),
        }
    })
}

// Sign flag plus the grouped two-place magnitude. Rounding to zero drops
// the sign.
fn fixed_two(amount: Decimal, group: char, decimal: char) -> (bool, String) {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    (
        negative,
        format!("{}{decimal}{fraction}", group_digits(whole, group)),
    )
}

fn group_digits(whole: &str, group: char) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);

    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(group);
        }
        out.push(ch);
    }

    out
}
