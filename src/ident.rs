use crate::error::*;

use vcd::IdCode;

/// How identifiers are handed out once the single characters run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Only `!` to `~`, one character each. More signals are an error.
    SingleChar,
    /// Continue with multi-character codes (`!!`, `"!`, ...).
    Extended,
}

/// A signal with the identifier it is dumped under.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub code: IdCode,
}

/// Assigns identifiers to signals in the order given.
///
/// Index `i` in the table always holds the `i`-th signal. The first 94 codes
/// are the printable characters starting at `!`. Codes are never reused.
#[derive(Debug, Clone)]
pub struct IdTable {
    signals: Vec<Signal>,
}

impl IdTable {
    /// Number of single character identifiers, `!` through `~`.
    pub const SINGLE_CHAR_IDS: usize = 94;

    pub fn allocate<S>(names: impl IntoIterator<Item = S>, policy: IdPolicy) -> Result<Self>
        where
            S: Into<String>
    {
        let names: Vec<String> = names.into_iter()
            .map(Into::into)
            .collect();

        if policy == IdPolicy::SingleChar && names.len() > Self::SINGLE_CHAR_IDS {
            return Err(Error::IdentifiersExhausted(names.len(), Self::SINGLE_CHAR_IDS));
        }

        let mut code = IdCode::FIRST;
        let mut signals = Vec::with_capacity(names.len());
        for name in names {
            signals.push(Signal { name, code });
            code = code.next();
        }

        Ok(Self { signals })
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{}", i)).collect()
    }

    #[test]
    fn test_single_char_codes() {
        let table = IdTable::allocate(names(94), IdPolicy::SingleChar).unwrap();

        for (i, signal) in table.iter().enumerate() {
            let expected = char::from(33 + i as u8).to_string();
            assert_eq!(expected, signal.code.to_string());
            assert_eq!(format!("s{}", i), signal.name);
        }

        let codes: Vec<String> = table.iter()
            .map(|s| s.code.to_string())
            .collect();
        assert_eq!(94, codes.len());
        assert_eq!("!", codes[0]);
        assert_eq!("\"", codes[1]);
        assert_eq!("~", codes[93]);
    }

    #[test]
    fn test_single_char_exhausted() {
        let res = IdTable::allocate(names(95), IdPolicy::SingleChar);
        assert!(matches!(res, Err(Error::IdentifiersExhausted(95, 94))));
    }

    #[test]
    fn test_extended_codes_unique() {
        let table = IdTable::allocate(names(500), IdPolicy::Extended).unwrap();
        assert_eq!(500, table.len());

        let mut codes: Vec<String> = table.iter()
            .map(|s| s.code.to_string())
            .collect();
        assert_eq!("~", codes[93]);
        assert_eq!(2, codes[94].len());

        codes.sort();
        codes.dedup();
        assert_eq!(500, codes.len());
    }

    #[test]
    fn test_allocation_is_stable() {
        let a = IdTable::allocate(vec!["clk", "rst", "data"], IdPolicy::Extended).unwrap();
        let b = IdTable::allocate(vec!["clk", "rst", "data"], IdPolicy::Extended).unwrap();

        let a: Vec<_> = a.iter().cloned().collect();
        let b: Vec<_> = b.iter().cloned().collect();
        assert_eq!(a, b);
    }
}
