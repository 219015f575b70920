//! Prices and loyalty points
//!
//! Both are fixed-point with two decimals: a `Price` counts cents and
//! `Points` counts hundredths of a point. One point is worth one dollar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of a card or fonepay purchase returned as points, in percent
pub const POINTS_EARN_PERCENT: u64 = 10;

/// A catalog price such as `"$9.99"`, stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    pub const FREE: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn is_free(self) -> bool {
        self.0 == 0
    }

    /// Points earned when paying this price by card or fonepay,
    /// rounded half up to the hundredth
    pub fn reward(self) -> Points {
        let hundredths = (self.0 * POINTS_EARN_PERCENT + 50) / 100;
        Points::from_hundredths(hundredths as i64)
    }
}

/// Error returned when a price string cannot be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriceError(String);

impl fmt::Display for ParsePriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid price: {:?}", self.0)
    }
}

impl std::error::Error for ParsePriceError {}

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePriceError(s.to_string());
        let amount = s.trim().trim_start_matches('$');
        let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }
        if frac.len() > 2 {
            return Err(err());
        }

        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Price)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Price {
    type Error = ParsePriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A loyalty points balance in hundredths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    /// Balance every new account starts with (2.50 points)
    pub const STARTING_BALANCE: Points = Points(250);

    pub fn from_hundredths(hundredths: i64) -> Self {
        Points(hundredths)
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    /// Whether the balance covers the price
    pub fn covers(self, price: Price) -> bool {
        i64::try_from(price.cents()).map_or(false, |cents| self.0 >= cents)
    }

    /// Balance after paying `price` with points, if affordable
    pub fn spend(self, price: Price) -> Option<Points> {
        if !self.covers(price) {
            return None;
        }
        let cents = i64::try_from(price.cents()).ok()?;
        Some(Points(self.0 - cents))
    }

    pub fn earn(self, reward: Points) -> Points {
        Points(self.0.saturating_add(reward.0))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!("$9.99".parse::<Price>().unwrap().cents(), 999);
        assert_eq!("$0.00".parse::<Price>().unwrap(), Price::FREE);
        assert_eq!("12".parse::<Price>().unwrap().cents(), 1200);
        assert_eq!("$7.5".parse::<Price>().unwrap().cents(), 750);
        assert!("$abc".parse::<Price>().is_err());
        assert!("$1.234".parse::<Price>().is_err());
        assert!("$".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_display_round_trips() {
        let price = Price::from_cents(1299);
        assert_eq!(price.to_string(), "$12.99");
        assert_eq!(price.to_string().parse::<Price>().unwrap(), price);
    }

    #[test]
    fn test_reward_is_ten_percent_rounded() {
        assert_eq!(Price::from_cents(999).reward(), Points::from_hundredths(100));
        assert_eq!(Price::from_cents(1000).reward(), Points::from_hundredths(100));
        assert_eq!(Price::from_cents(1299).reward(), Points::from_hundredths(130));
        assert_eq!(Price::FREE.reward(), Points::default());
    }

    #[test]
    fn test_spend_requires_balance() {
        let balance = Points::STARTING_BALANCE;
        assert_eq!(balance.spend(Price::from_cents(999)), None);
        assert_eq!(
            balance.spend(Price::from_cents(200)),
            Some(Points::from_hundredths(50))
        );
        assert_eq!(balance.spend(Price::FREE), Some(balance));
    }

    #[test]
    fn test_points_display() {
        assert_eq!(Points::STARTING_BALANCE.to_string(), "2.50");
        assert_eq!(Points::from_hundredths(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_price_serializes_as_string() {
        let json = serde_json::to_value(Price::from_cents(899)).unwrap();
        assert_eq!(json, "$8.99");
        let back: Price = serde_json::from_value(json).unwrap();
        assert_eq!(back.cents(), 899);
    }
}
