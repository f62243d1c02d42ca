//! Line protocol end to end: transport bytes in, replies out

use yag_trigger::hal::{
    MockBench, MockDelay, MockRelays, MockThermometer, MockTransport, MockTrigger,
};
use yag_trigger::traits::LineTransport;
use yag_trigger::{
    Activity, Console, LineAssembler, ModeKind, OperatingMode, ProgramConfig, SpotParams,
    StitchParams, WeldController,
};

type Controller = WeldController<MockRelays, MockTrigger, MockDelay>;

struct Rig {
    bench: MockBench,
    controller: Controller,
    console: Console<MockThermometer>,
    lines: LineAssembler,
    link: MockTransport,
}

impl Rig {
    fn new() -> Self {
        Self::with_program(ProgramConfig::default())
    }

    fn with_program(program: ProgramConfig) -> Self {
        let bench = MockBench::new();
        let mut controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay())
            .with_program(program);
        controller.boot().unwrap();
        Self {
            bench,
            controller,
            console: Console::new(MockThermometer::new(27.0)),
            lines: LineAssembler::new(64),
            link: MockTransport::new(),
        }
    }

    /// One pass of the firmware loop over everything queued on the link.
    fn service(&mut self) -> String {
        let mut chunk = [0u8; 16];
        loop {
            let n = self.link.try_read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                if let Some(event) = self.lines.push(byte) {
                    let reply = self.console.handle(&event, &mut self.controller);
                    self.link.write_all(reply.as_bytes()).unwrap();
                }
            }
        }
        String::from_utf8(self.link.take_sent()).unwrap()
    }

    fn send(&mut self, line: &str) -> String {
        self.link.queue_line(line);
        self.service()
    }
}

// ============================================================================
// Mode commands
// ============================================================================

#[test]
fn spot_command_then_queries() {
    let mut rig = Rig::new();

    assert_eq!(rig.send("spot 0.2 1.0"), "OK spot\r\n");
    assert_eq!(rig.send("mode?"), "spot\r\n");
    assert_eq!(
        rig.send("program?"),
        "spot delay: 0.2, ON: 1.0\r\nstitch delay: 0.0, ON: 0.0, OFF: 0.0\r\n"
    );
    assert_eq!(rig.bench.relay_pattern(), [true, true, false, true]);
}

#[test]
fn stitch_and_normal_commands() {
    let mut rig = Rig::new();

    assert_eq!(rig.send("stitch 0.5 0.3 0.7"), "OK stitch\r\n");
    assert_eq!(
        rig.controller.mode(),
        OperatingMode::Stitch(StitchParams::new(0.5, 0.3, 0.7))
    );
    assert_eq!(rig.send("normal"), "OK normal\r\n");
    assert_eq!(rig.send("mode?"), "normal\r\n");
    assert_eq!(rig.bench.relay_pattern(), [false; 4]);
    // The stitch program is kept after leaving stitch mode
    assert!(rig.send("program?").ends_with("stitch delay: 0.5, ON: 0.3, OFF: 0.7\r\n"));
}

#[test]
fn negative_parameters_are_echoed() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("spot -1 0"), "OK spot\r\n");
    assert!(rig
        .send("program?")
        .starts_with("spot delay: -1.0, ON: 0.0\r\n"));
}

#[test]
fn parameters_echo_full_precision() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("spot 0 0.123456789"), "OK spot\r\n");
    assert!(rig
        .send("program?")
        .starts_with("spot delay: 0.0, ON: 0.123456789\r\n"));
}

#[test]
fn boot_programs_are_reported() {
    let mut rig = Rig::with_program(
        ProgramConfig::default()
            .with_spot(SpotParams::new(0.1, 0.4))
            .with_stitch(StitchParams::new(0.0, 0.25, 0.75)),
    );
    assert_eq!(rig.send("mode?"), "normal\r\n");
    assert_eq!(
        rig.send("program?"),
        "spot delay: 0.1, ON: 0.4\r\nstitch delay: 0.0, ON: 0.25, OFF: 0.75\r\n"
    );
}

// ============================================================================
// Rejected commands
// ============================================================================

#[test]
fn wrong_parameter_count_leaves_state_unchanged() {
    let mut rig = Rig::new();
    rig.send("spot 0.2 1.0");
    rig.bench.clear_journal();
    let before = rig.controller.state();

    assert_eq!(
        rig.send("stitch 0.1 0.2"),
        "YAG_ERROR: stitch expects 3 parameters, got 2\r\n"
    );
    assert_eq!(
        rig.send("spot 0.5"),
        "YAG_ERROR: spot expects 2 parameters, got 1\r\n"
    );

    assert_eq!(rig.controller.state(), before);
    assert!(rig.bench.journal().is_empty());
    assert_eq!(rig.send("mode?"), "spot\r\n");
}

#[test]
fn bad_numbers_are_rejected() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.send("spot 0.2 long"),
        "YAG_ERROR: invalid number 'long'\r\n"
    );
    assert_eq!(
        rig.send("spot inf 1"),
        "YAG_ERROR: parameter 'inf' is not finite\r\n"
    );
    assert_eq!(rig.controller.mode(), OperatingMode::Normal);
}

#[test]
fn unknown_commands() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("weld"), "YAG_ERROR: wrong command\r\n");
    assert_eq!(rig.send("Normal"), "YAG_ERROR: wrong command\r\n");
    assert_eq!(rig.send("mode"), "YAG_ERROR: wrong command\r\n");
}

#[test]
fn overlong_line_is_wrong_command() {
    let mut rig = Rig::new();
    let long = format!("spot {}", "1".repeat(100));
    assert_eq!(rig.send(&long), "YAG_ERROR: wrong command\r\n");
    // The next line is unaffected
    assert_eq!(rig.send("mode?"), "normal\r\n");
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn temperature_query() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("temp?"), "27.0\r\n");
}

#[test]
fn help_lists_usage() {
    let mut rig = Rig::new();
    let reply = rig.send("help");
    assert!(reply.starts_with("normal\r\n"));
    assert!(reply.contains("spot <delay> <ON time>\r\n"));
    assert!(reply.contains("counters?\r\n"));
}

#[test]
fn counters_follow_welds() {
    let mut rig = Rig::new();
    rig.send("spot 0 0.1");

    rig.bench.press();
    rig.bench.release();
    assert_eq!(
        rig.controller.poll().unwrap(),
        Some(Activity::Spot { spot_count: 1 })
    );

    assert_eq!(rig.send("counters?"), "spot counter: 1, stitch counter: 0\r\n");
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn several_lines_in_one_read() {
    let mut rig = Rig::new();
    rig.link.queue_bytes(b"spot 0.2 1.0\r\nmode?\r\ncounters?\n");
    assert_eq!(
        rig.service(),
        "OK spot\r\nspot\r\nspot counter: 0, stitch counter: 0\r\n"
    );
}

#[test]
fn line_split_across_reads() {
    let mut rig = Rig::new();
    rig.link.queue_bytes(b"sti");
    assert_eq!(rig.service(), "");
    rig.link.queue_bytes(b"tch 0 0.5 0.5\r");
    assert_eq!(rig.service(), "");
    rig.link.queue_bytes(b"\n");
    assert_eq!(rig.service(), "OK stitch\r\n");
    assert_eq!(rig.controller.mode().kind(), ModeKind::Stitch);
}
