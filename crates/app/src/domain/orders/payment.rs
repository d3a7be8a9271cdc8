//! Payment data masking.

/// Stored in place of the card verification value.
pub const CVV_PLACEHOLDER: &str = "***";

const MASK: char = '*';
const VISIBLE_DIGITS: usize = 4;

/// Replace every ASCII digit of a card number with `*` except the last four.
///
/// Separators and other non-digit characters keep their positions, so the
/// masked value has the same length as the input.
#[must_use]
pub fn mask_card_number(card_number: &str) -> String {
    let digits = card_number.chars().filter(char::is_ascii_digit).count();
    let masked = digits.saturating_sub(VISIBLE_DIGITS);

    let mut seen = 0;

    card_number
        .chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }

            seen += 1;

            if seen <= masked { MASK } else { c }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_last_four_digits() {
        assert_eq!(mask_card_number("4111111111111111"), "************1111");
    }

    #[test]
    fn keeps_separators_in_place() {
        assert_eq!(
            mask_card_number("4111-1111 1111-1234"),
            "****-**** ****-1234"
        );
    }

    #[test]
    fn short_numbers_are_left_alone() {
        assert_eq!(mask_card_number("1234"), "1234");
        assert_eq!(mask_card_number("12"), "12");
    }

    #[test]
    fn preserves_length() {
        let input = "5500 0000 0000 0004";

        assert_eq!(mask_card_number(input).len(), input.len());
    }
}
