/// The closed set of logical operators used when comparing diagrams.
///
/// Every operator is a pure function of two booleans, including [`Not`],
/// which is deliberately the binary inequality test `a != b` rather than a
/// unary negation.
///
/// [`Not`]: Logical::Not
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Logical {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
}

impl Logical {
    /// Apply the operator to a pair of booleans.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Logical::And => a && b,
            Logical::Or => a || b,
            Logical::Not => a != b,
            Logical::Nand => !(a && b),
            Logical::Nor => !(a || b),
            Logical::Xor => a ^ b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or() {
        assert!(Logical::And.apply(true, true));
        assert!(!Logical::And.apply(true, false));
        assert!(Logical::Or.apply(true, false));
        assert!(!Logical::Or.apply(false, false));
    }

    #[test]
    fn test_not_is_inequality() {
        // NOT is binary here: it compares its two operands.
        assert!(!Logical::Not.apply(true, true));
        assert!(!Logical::Not.apply(false, false));
        assert!(Logical::Not.apply(true, false));
        assert!(Logical::Not.apply(false, true));
    }

    #[test]
    fn test_negated_operators() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(Logical::Nand.apply(a, b), !Logical::And.apply(a, b));
                assert_eq!(Logical::Nor.apply(a, b), !Logical::Or.apply(a, b));
                assert_eq!(Logical::Xor.apply(a, b), a ^ b);
            }
        }
    }
}
