//! Card and PIN credentials presented at the machine

use super::error::AtmError;
use std::fmt;
use std::str::FromStr;

/// A payment card identified by its number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    number: String,
}

impl Card {
    /// Create a card from its raw number
    ///
    /// # Errors
    ///
    /// Returns `InvalidCardNumber` if the number is empty or contains anything
    /// other than ASCII digits.
    pub fn new(number: impl Into<String>) -> Result<Self, AtmError> {
        let number = number.into();
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AtmError::invalid_card_number(&number));
        }
        Ok(Card { number })
    }

    /// The full card number, as handed to the bank
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The card number with all but the last four digits hidden
    pub fn masked(&self) -> String {
        let visible = self.number.len().saturating_sub(4);
        let mut masked = "*".repeat(visible);
        masked.push_str(&self.number[visible..]);
        masked
    }
}

impl FromStr for Card {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::new(s.trim())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// A four digit personal identification number
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinCode {
    digits: [u8; 4],
}

impl PinCode {
    /// Create a PIN from its four digits
    ///
    /// # Errors
    ///
    /// Returns `InvalidPin` if any digit is greater than 9.
    pub fn new(digits: [u8; 4]) -> Result<Self, AtmError> {
        if digits.iter().any(|&digit| digit > 9) {
            return Err(AtmError::InvalidPin);
        }
        Ok(PinCode { digits })
    }

    /// The digit sequence, as handed to the bank
    pub fn digits(&self) -> &[u8; 4] {
        &self.digits
    }
}

impl FromStr for PinCode {
    type Err = AtmError;

    /// Parse exactly four digit characters, e.g. `"0042"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 4 {
            return Err(AtmError::InvalidPin);
        }

        let mut digits = [0u8; 4];
        for (slot, ch) in digits.iter_mut().zip(trimmed.chars()) {
            let digit = ch.to_digit(10).ok_or(AtmError::InvalidPin)?;
            *slot = digit as u8;
        }

        PinCode::new(digits)
    }
}

// PINs must never end up in logs or panic messages
impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCode(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_card_keeps_number() {
        let card = Card::new("1111222233334444").unwrap();
        assert_eq!(card.number(), "1111222233334444");
    }

    #[rstest]
    #[case::empty("", "")]
    #[case::letters("1111-2222", "*****2222")]
    #[case::whitespace_inside("1111 2222", "*****2222")]
    #[case::long_typo("111122223333444x", "************444x")]
    fn test_card_rejects_invalid_numbers(#[case] number: &str, #[case] logged: &str) {
        assert_eq!(
            Card::new(number),
            Err(AtmError::InvalidCardNumber {
                number: logged.to_string()
            })
        );
    }

    #[rstest]
    #[case::long("1111222233334444", "************4444")]
    #[case::exactly_four("1234", "1234")]
    #[case::short("12", "12")]
    fn test_card_masking(#[case] number: &str, #[case] expected: &str) {
        let card = Card::new(number).unwrap();
        assert_eq!(card.masked(), expected);
        assert_eq!(card.to_string(), expected);
    }

    #[test]
    fn test_pin_keeps_digits_in_order() {
        let pin = PinCode::new([1, 2, 3, 4]).unwrap();
        assert_eq!(pin.digits(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_pin_rejects_out_of_range_digit() {
        assert_eq!(PinCode::new([1, 2, 10, 4]), Err(AtmError::InvalidPin));
    }

    #[rstest]
    #[case::plain("1234", [1, 2, 3, 4])]
    #[case::leading_zeros("0042", [0, 0, 4, 2])]
    #[case::trimmed(" 9876 ", [9, 8, 7, 6])]
    fn test_pin_parsing(#[case] input: &str, #[case] expected: [u8; 4]) {
        assert_eq!(input.parse::<PinCode>().unwrap().digits(), &expected);
    }

    #[rstest]
    #[case::too_short("123")]
    #[case::too_long("12345")]
    #[case::letter("12a4")]
    #[case::empty("")]
    fn test_pin_parsing_errors(#[case] input: &str) {
        assert_eq!(input.parse::<PinCode>(), Err(AtmError::InvalidPin));
    }

    #[test]
    fn test_pin_debug_hides_digits() {
        let pin = PinCode::new([1, 2, 3, 4]).unwrap();
        assert_eq!(format!("{:?}", pin), "PinCode(****)");
    }
}
