/// One mapping line of a gennorm2 data file.
///
/// The recognized shape is `LOW[..HIGH](=|>)[TARGET]` at the start of the
/// line, where each field is 4 or 5 uppercase hex digits. Canonical (`=`)
/// and compatibility (`>`) mappings are not distinguished here; the table
/// collapses both into "folds to". Only the first codepoint of a
/// multi-codepoint mapping is kept, trailing text is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub low: u32,
    pub high: u32,
    /// `None` when the target field is absent or too short. The loader
    /// turns that into the nuke sentinel, not identity.
    pub target: Option<u32>,
}

impl Rule {
    /// Parses the mapping at the start of `line`.
    ///
    /// Anything else returns `None`: comments, `* Unicode` version lines,
    /// combining-class assignments like `0300..0314:230`, blank lines.
    /// Skipping them is the caller's job; none of them are errors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use norma::Rule;
    /// let rule = Rule::parse("2000..200A>0020").unwrap();
    /// assert_eq!((rule.low, rule.high, rule.target), (0x2000, 0x200A, Some(0x20)));
    /// assert!(Rule::parse("0300..0314:230").is_none());
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (low, rest) = source_field(line)?;

        let (high, rest) = match rest.strip_prefix("..") {
            Some(rest) => source_field(rest)?,
            None => (low, rest),
        };

        let rest = rest.strip_prefix(['=', '>'])?;

        // No follower constraint on the target: take the first five digits
        // of a longer run, none at all of a shorter one.
        let (len, value) = hex_run(rest);
        let target = (len >= 4).then_some(value);

        Some(Self { low, high, target })
    }

    pub(crate) const fn covers(self, c: u32) -> bool {
        self.low <= c && c <= self.high
    }
}

/// A source bound is a maximal hex run of exactly 4 or 5 digits. A longer
/// run can never back off to a shorter match: the leftover digit would sit
/// where `..` or the separator has to be.
fn source_field(s: &str) -> Option<(u32, &str)> {
    let (len, value) = hex_run(s);
    if len == 4 || len == 5 {
        Some((value, &s[len..]))
    } else {
        None
    }
}

/// Length of the leading uppercase-hex run and the value of its first five
/// digits (the widest a codepoint field can be).
fn hex_run(s: &str) -> (usize, u32) {
    let mut len = 0;
    let mut value = 0;
    for b in s.bytes() {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => break,
        };
        if len < 5 {
            value = (value << 4) | digit;
        }
        len += 1;
    }
    (len, value)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const fn rule(low: u32, high: u32, target: Option<u32>) -> Option<Rule> {
        Some(Rule { low, high, target })
    }

    #[rstest]
    #[case::fold("0041>0061", rule(0x41, 0x41, Some(0x61)))]
    #[case::canonical("00DC=0055 0308", rule(0xDC, 0xDC, Some(0x55)))]
    #[case::range("2000..200A>0020", rule(0x2000, 0x200A, Some(0x20)))]
    #[case::removed("00AD>", rule(0xAD, 0xAD, None))]
    #[case::removed_range("FE00..FE0F>", rule(0xFE00, 0xFE0F, None))]
    #[case::removed_canonical("FEFF=", rule(0xFEFF, 0xFEFF, None))]
    #[case::supplementary("10400>10428", rule(0x10400, 0x10400, Some(0x10428)))]
    #[case::five_digit_range("1D400..1D419>0061", rule(0x1D400, 0x1D419, Some(0x61)))]
    #[case::multi_codepoint("00DF>0073 0073", rule(0xDF, 0xDF, Some(0x73)))]
    #[case::trailing_comment("0041>0061 # LATIN SMALL LETTER A", rule(0x41, 0x41, Some(0x61)))]
    #[case::long_target("0041>004100", rule(0x41, 0x41, Some(0x410)))]
    #[case::short_target("0041>61", rule(0x41, 0x41, None))]
    fn parses(#[case] line: &str, #[case] expected: Option<Rule>) {
        assert_eq!(Rule::parse(line), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::comment("# comments are annotations, not mappings")]
    #[case::version("* Unicode 15.1.0")]
    #[case::combining_class("0300..0314:230")]
    #[case::combining_class_single("0345:240")]
    #[case::lowercase_hex("00ad>")]
    #[case::three_digit_low("041>0061")]
    #[case::six_digit_low("004100>0061")]
    #[case::six_digit_high("2000..004100>0020")]
    #[case::short_high("2000..61>0020")]
    #[case::single_dot("0041.0061>")]
    #[case::no_separator("0041 0061")]
    fn skips(#[case] line: &str) {
        assert_eq!(Rule::parse(line), None);
    }

    #[rstest]
    #[case(0x1FFF, false)]
    #[case(0x2000, true)]
    #[case(0x2005, true)]
    #[case(0x200A, true)]
    #[case(0x200B, false)]
    fn covers(#[case] c: u32, #[case] expected: bool) {
        let rule = Rule::parse("2000..200A>0020").unwrap();
        assert_eq!(rule.covers(c), expected);
    }
}
