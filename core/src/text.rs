/// Upper-cases the first letter of every word, leaving the rest untouched.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if at_word_start && ch.is_ascii_lowercase() {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_ascii_alphanumeric() && ch != '_';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalises_each_word() {
        assert_eq!(title_case("annual"), "Annual");
        assert_eq!(title_case("sick leave"), "Sick Leave");
        assert_eq!(title_case("pending"), "Pending");
    }

    #[test]
    fn keeps_existing_capitals_and_punctuation() {
        assert_eq!(title_case("Casual"), "Casual");
        assert_eq!(title_case("half-day"), "Half-Day");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn only_ascii_letters_and_digits_continue_a_word() {
        assert_eq!(title_case("éa"), "éA");
        assert_eq!(title_case("snake_case"), "Snake_case");
        assert_eq!(title_case("2nd half"), "2nd Half");
    }
}
