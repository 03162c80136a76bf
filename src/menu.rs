use crate::error::RentalError;
use std::str::FromStr;

/// Options offered on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Rent,
    Return,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let number: u32 = s
            .parse()
            .map_err(|_| RentalError::InvalidInput(format!("'{}' is not a number", s)))?;
        match number {
            1 => Ok(MenuChoice::Rent),
            2 => Ok(MenuChoice::Return),
            3 => Ok(MenuChoice::Exit),
            other => Err(RentalError::InvalidInput(format!(
                "there is no menu option {}",
                other
            ))),
        }
    }
}

/// Parse a rental length typed by the operator. Must be a whole number above zero.
pub fn parse_days(s: &str) -> Result<u32, RentalError> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(RentalError::InvalidInput(
            "a rental must last at least one day".to_string(),
        )),
        Ok(days) => Ok(days),
        Err(_) => Err(RentalError::InvalidInput(format!(
            "'{}' is not a valid number of days",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choices() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Rent));
        assert_eq!(" 2 ".parse::<MenuChoice>(), Ok(MenuChoice::Return));
        assert_eq!("03".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
    }

    #[test]
    fn test_menu_rejects_out_of_range_and_garbage() {
        for input in ["0", "4", "-1", "abc", "", "1.5"] {
            assert!(
                matches!(input.parse::<MenuChoice>(), Err(RentalError::InvalidInput(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("5"), Ok(5));
        assert_eq!(parse_days(" 12\t"), Ok(12));
        assert!(parse_days("0").is_err());
        assert!(parse_days("-3").is_err());
        assert!(parse_days("three").is_err());
        assert!(parse_days("").is_err());
    }
}
