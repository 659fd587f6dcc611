#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Start,
    Stop,
    Toggle,
    ConfigReload,
}

impl AppEvent {
    /// Parses a control socket command.
    pub fn from_command(line: &str) -> Option<Self> {
        match line.trim() {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "toggle" => Some(Self::Toggle),
            "reload" => Some(Self::ConfigReload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command() {
        assert_eq!(AppEvent::from_command("start\n"), Some(AppEvent::Start));
        assert_eq!(AppEvent::from_command("  stop "), Some(AppEvent::Stop));
        assert_eq!(AppEvent::from_command("toggle"), Some(AppEvent::Toggle));
        assert_eq!(AppEvent::from_command("reload"), Some(AppEvent::ConfigReload));
        assert_eq!(AppEvent::from_command("show"), None);
    }
}
