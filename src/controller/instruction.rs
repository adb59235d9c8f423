/// The free-text instruction surface, parsed once at the boundary into
/// a closed set of typed variants. `homing <axis>` is the only
/// instruction the controller recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Homing { axis: u8 },
}

#[derive(Debug)]
pub enum InstructionError {
    /// The instruction name is not one we recognize.
    Unknown(String),
    /// Recognized instruction, malformed arguments.
    InvalidArguments(String),
}

impl std::fmt::Display for InstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructionError::Unknown(name) => write!(f, "Unknown instruction: {}", name),
            InstructionError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for InstructionError {}

impl Instruction {
    /// Parses a whitespace-delimited instruction line. The instruction
    /// name is case-insensitive.
    pub fn parse(line: &str) -> Result<Self, InstructionError> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("").to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match name.as_str() {
            "homing" => {
                if args.len() != 1 {
                    return Err(InstructionError::InvalidArguments(format!(
                        "homing takes exactly one axis argument, got {}",
                        args.len()
                    )));
                }
                let axis = args[0].parse::<u8>().map_err(|_| {
                    InstructionError::InvalidArguments(format!("invalid axis number: {}", args[0]))
                })?;
                Ok(Instruction::Homing { axis })
            }
            other => Err(InstructionError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_homing() {
        assert_eq!(
            Instruction::parse("homing 3").unwrap(),
            Instruction::Homing { axis: 3 }
        );
        assert_eq!(
            Instruction::parse("HOMING 1").unwrap(),
            Instruction::Homing { axis: 1 }
        );
    }

    #[test]
    fn test_parse_homing_bad_arguments() {
        assert!(matches!(
            Instruction::parse("homing"),
            Err(InstructionError::InvalidArguments(_))
        ));
        assert!(matches!(
            Instruction::parse("homing 1 2"),
            Err(InstructionError::InvalidArguments(_))
        ));
        assert!(matches!(
            Instruction::parse("homing axis"),
            Err(InstructionError::InvalidArguments(_))
        ));
        assert!(matches!(
            Instruction::parse("homing 300"),
            Err(InstructionError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_parse_unknown_instruction() {
        assert!(matches!(
            Instruction::parse("jog 3"),
            Err(InstructionError::Unknown(name)) if name == "jog"
        ));
        assert!(matches!(
            Instruction::parse(""),
            Err(InstructionError::Unknown(_))
        ));
    }
}
