use logsink_core::Directive;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Messages taken off the ingress, control messages included.
    pub received: u64,
    /// Records durably written.
    pub logged: u64,
    /// Records mirrored to the console.
    pub echoed: u64,
    pub terminate_directives: u64,
    pub echo_enable_directives: u64,
    pub echo_disable_directives: u64,
}

impl SinkStats {
    /// Count a received message and its directive.
    pub fn observe(&mut self, directive: Directive) {
        self.received += 1;
        match directive {
            Directive::None => {}
            Directive::Terminate => self.terminate_directives += 1,
            Directive::EchoEnable => self.echo_enable_directives += 1,
            Directive::EchoDisable => self.echo_disable_directives += 1,
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            received = self.received,
            logged = self.logged,
            echoed = self.echoed,
            terminate = self.terminate_directives,
            echo_enable = self.echo_enable_directives,
            echo_disable = self.echo_disable_directives,
            "receive loop summary"
        );
    }
}
