/// Single key commands understood on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl Command {
    /// `s` starts and `p` stops. Every other byte, upper case included, is not a command.
    pub fn from_byte(byte: u8) -> Option<Command> {
        match byte {
            b's' => Some(Command::Start),
            b'p' => Some(Command::Stop),
            _ => None,
        }
    }
}

/// Change of the activation flag caused by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Stopped,
}

/// Whether readings are being taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationFlag {
    active: bool,
}

impl ActivationFlag {
    pub fn new() -> ActivationFlag {
        ActivationFlag::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Applies `command`, returning the transition only if the flag actually changed
    pub fn apply(&mut self, command: Command) -> Option<Transition> {
        match (command, self.active) {
            (Command::Start, false) => {
                self.active = true;
                Some(Transition::Started)
            }
            (Command::Stop, true) => {
                self.active = false;
                Some(Transition::Stopped)
            }
            _ => None,
        }
    }
}
