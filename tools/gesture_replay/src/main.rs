use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use floatball::{
    gesture::{active_config, GestureConfig, OverlayAction, Point, PointerEvent, PointerKind},
    overlay::{GestureCounters, HostCall, OverlayController, RecordingHost},
    GestureInterpreter,
};
use gesture_config_compiler::{action_variant, load_config_file, GestureFile};

const TRACE_HEADER: &str = "pointer,ms,kind,x,y";
const HOST_CALL_LABELS: [&str; 4] = ["move_by", "set_position", "snap_back", "vibrate"];

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replays a recorded pointer trace through the floatball gesture interpreter")]
struct Cli {
    /// CSV lines of `pointer,<ms>,<down|move|up|cancel>,<x>,<y>`.
    trace: PathBuf,
    /// Gesture TOML to use instead of the compiled-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// One expected call per line: a host call label or `emit:<action>`.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long = "rest-x", default_value_t = 0.0)]
    rest_x: f32,
    #[arg(long = "rest-y", default_value_t = 0.0)]
    rest_y: f32,
    /// Print the controller counters after the calls.
    #[arg(long)]
    counters: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let file = load_config_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            gesture_config_from_file(&file)?
        }
        None => *active_config(),
    };
    let interpreter = GestureInterpreter::new(config)
        .context("invalid gesture config")?
        .with_rest_position(Point::new(cli.rest_x, cli.rest_y));

    let source = read_to_string(&cli.trace)?;
    let events = parse_trace(&source)
        .with_context(|| format!("failed to parse {}", cli.trace.display()))?;
    let (calls, counters) = replay(interpreter, &events)?;
    log::info!(
        "replay: events={} calls={} trace={}",
        events.len(),
        calls.len(),
        cli.trace.display()
    );

    println!("call,label,args");
    for call in &calls {
        println!("call,{call}");
    }
    if cli.counters {
        println!("{}", counters_line(&counters));
    }

    if let Some(expect_path) = cli.expect {
        let expected = parse_expected_calls(&read_to_string(&expect_path)?)
            .with_context(|| format!("failed to parse {}", expect_path.display()))?;
        let actual: Vec<String> = calls.iter().map(call_token).collect();
        if actual != expected {
            eprintln!("expected calls: {}", expected.join(","));
            eprintln!("actual calls:   {}", actual.join(","));
            bail!("call sequence mismatch");
        }
    }

    Ok(())
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Feeds every event through a controller, then pumps past the last event by
/// one long-press timeout so a deadline left pending is observed.
fn replay(
    interpreter: GestureInterpreter,
    events: &[PointerEvent],
) -> Result<(Vec<HostCall>, GestureCounters)> {
    let flush_after_ms = interpreter.config().long_press_timeout_ms;
    let mut overlay = OverlayController::new(interpreter, RecordingHost::new());
    for event in events {
        overlay.dispatch(*event).with_context(|| {
            format!(
                "controller rejected {} at {} ms",
                event.kind.label(),
                event.t_ms
            )
        })?;
    }
    if let Some(last) = events.last() {
        overlay.pump(last.t_ms.saturating_add(flush_after_ms));
    }

    let counters = overlay.counters();
    Ok((overlay.into_host().take_calls(), counters))
}

fn gesture_config_from_file(file: &GestureFile) -> Result<GestureConfig> {
    let label = file.outcomes.centered_long_press.trim();
    let centered_long_press = match action_variant(label)? {
        None => None,
        Some(_) => Some(
            OverlayAction::from_label(label)
                .with_context(|| format!("unknown centered_long_press action '{label}'"))?,
        ),
    };
    Ok(GestureConfig {
        click_timeout_ms: file.timing.click_timeout_ms,
        long_press_timeout_ms: file.timing.long_press_timeout_ms,
        move_slop: file.distance.move_slop,
        max_distance: file.distance.max_distance,
        snap_back_duration_ms: file.timing.snap_back_duration_ms,
        centered_long_press,
    })
}

fn parse_trace(source: &str) -> Result<Vec<PointerEvent>> {
    let mut out = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts[0] != "pointer" {
            continue;
        }
        if parts.len() < 5 {
            bail!("line {line_no}: expected 5 columns, found {}", parts.len());
        }

        let t_ms = parts[1]
            .parse::<u64>()
            .with_context(|| format!("line {line_no}: invalid ms '{}'", parts[1]))?;
        let kind = PointerKind::from_label(parts[2])
            .with_context(|| format!("line {line_no}: invalid kind '{}'", parts[2]))?;
        let x = parse_coord(parts[3], line_no, "x")?;
        let y = parse_coord(parts[4], line_no, "y")?;
        out.push(PointerEvent::new(kind, x, y, t_ms));
    }
    Ok(out)
}

fn parse_coord(raw: &str, line_no: usize, field: &str) -> Result<f32> {
    let value = raw
        .parse::<f32>()
        .with_context(|| format!("line {line_no}: invalid {field} '{raw}'"))?;
    if !value.is_finite() {
        bail!("line {line_no}: {field} must be finite");
    }
    Ok(value)
}

fn parse_expected_calls(source: &str) -> Result<Vec<String>> {
    let mut calls = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let token = line.trim().to_ascii_lowercase();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let known = match token.strip_prefix("emit:") {
            Some(action) => OverlayAction::from_label(action).is_some(),
            None => HOST_CALL_LABELS.contains(&token.as_str()),
        };
        if !known {
            bail!("line {}: invalid expected call '{}'", line_no + 1, token);
        }
        calls.push(token);
    }
    Ok(calls)
}

fn call_token(call: &HostCall) -> String {
    match call {
        HostCall::Emit(action) => format!("emit:{}", action.label()),
        other => other.label().to_string(),
    }
}

fn counters_line(counters: &GestureCounters) -> String {
    format!(
        "counters,sessions={},clicks={},drags={},long_presses={},centered={},directional={},cancels={},resets={},ignored={}",
        counters.sessions,
        counters.clicks,
        counters.drags,
        counters.long_presses,
        counters.centered_long_presses,
        counters.directional_actions,
        counters.cancels,
        counters.resets,
        counters.ignored_events
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn default_interpreter() -> GestureInterpreter {
        GestureInterpreter::new(*active_config()).expect("compiled config is valid")
    }

    fn tokens(calls: &[HostCall]) -> Vec<String> {
        calls.iter().map(call_token).collect()
    }

    #[test]
    fn parses_pointer_lines_and_skips_noise() {
        let source = "\
# click near the ball
pointer,ms,kind,x,y

pointer,0,down,10,20
touch_trace,5,1,0,0,0,0
pointer, 80 , UP , 10.5 , 20
";
        let events = parse_trace(source).expect("trace parses");
        assert_eq!(
            events,
            vec![
                PointerEvent::down(10.0, 20.0, 0),
                PointerEvent::up(10.5, 20.0, 80),
            ]
        );
    }

    #[test]
    fn rejects_bad_kind_with_line_number() {
        let err = parse_trace("pointer,0,tap,1,1").expect_err("tap is not a pointer kind");
        assert!(format!("{err:#}").contains("line 1"));
    }

    #[test]
    fn rejects_short_lines() {
        assert!(parse_trace("pointer,0,down,1").is_err());
    }

    #[test]
    fn replays_click_trace() {
        let events = parse_trace("pointer,0,down,0,0\npointer,60,up,0,0").expect("trace parses");
        let (calls, counters) = replay(default_interpreter(), &events).expect("replay succeeds");
        assert_eq!(tokens(&calls), vec!["emit:open_menu", "snap_back"]);
        assert_eq!(counters.clicks, 1);
    }

    #[test]
    fn flush_observes_trailing_long_press() {
        let events = parse_trace("pointer,0,down,0,0").expect("trace parses");
        let (calls, _) = replay(default_interpreter(), &events).expect("replay succeeds");
        assert_eq!(tokens(&calls), vec!["vibrate"]);
    }

    #[test]
    fn bundled_traces_match_expectations() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("traces");
        for name in ["click", "drag", "long_press_up", "cancel"] {
            let trace = read_to_string(&dir.join(format!("{name}.csv"))).expect("trace readable");
            let expect =
                read_to_string(&dir.join(format!("{name}.expect"))).expect("expect readable");
            let events = parse_trace(&trace).expect("trace parses");
            let (calls, _) = replay(default_interpreter(), &events).expect("replay succeeds");
            assert_eq!(
                tokens(&calls),
                parse_expected_calls(&expect).expect("expectations parse"),
                "trace {name}"
            );
        }
    }

    #[test]
    fn out_of_order_trace_fails() {
        let events =
            parse_trace("pointer,100,down,0,0\npointer,50,up,0,0").expect("trace parses");
        assert!(replay(default_interpreter(), &events).is_err());
    }

    #[test]
    fn expected_calls_are_validated() {
        let calls = parse_expected_calls("# header\nvibrate\nEMIT:go_home\n\nsnap_back\n")
            .expect("expectations parse");
        assert_eq!(calls, vec!["vibrate", "emit:go_home", "snap_back"]);
        assert!(parse_expected_calls("emit:fly_away").is_err());
        assert!(parse_expected_calls("teleport").is_err());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[timing]\nclick_timeout_ms = 150\nlong_press_timeout_ms = 500\n\
             [distance]\nmove_slop = 8.0\nmax_distance = 90.0\n\
             [outcomes]\ncentered_long_press = \"none\""
        )
        .expect("write config");

        let parsed = load_config_file(file.path()).expect("config loads");
        let config = gesture_config_from_file(&parsed).expect("config converts");
        assert_eq!(config.click_timeout_ms, 150);
        assert_eq!(config.long_press_timeout_ms, 500);
        assert_eq!(config.move_slop, 8.0);
        assert_eq!(config.max_distance, 90.0);
        assert_eq!(config.snap_back_duration_ms, 160);
        assert_eq!(config.centered_long_press, None);
    }

    #[test]
    fn no_action_label_is_case_insensitive() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[timing]\nclick_timeout_ms = 200\nlong_press_timeout_ms = 400\n\
             [distance]\nmove_slop = 10.0\nmax_distance = 140.0\n\
             [outcomes]\ncentered_long_press = \"NONE\""
        )
        .expect("write config");

        let parsed = load_config_file(file.path()).expect("compiler accepts NONE");
        let config = gesture_config_from_file(&parsed).expect("replay accepts NONE");
        assert_eq!(config.centered_long_press, None);
    }

    #[test]
    fn action_labels_in_config_ignore_case() {
        let mut parsed = load_config_file(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/gesture.toml"),
        )
        .expect("default config loads");
        parsed.outcomes.centered_long_press = "Open_Notifications".to_string();
        let config = gesture_config_from_file(&parsed).expect("config converts");
        assert_eq!(
            config.centered_long_press,
            Some(OverlayAction::OpenNotifications)
        );
    }

    #[test]
    fn counters_line_lists_every_tally() {
        let line = counters_line(&GestureCounters {
            clicks: 2,
            ..GestureCounters::default()
        });
        assert!(line.starts_with("counters,sessions=0,clicks=2,"));
        assert!(line.contains(",resets=0,"));
        assert!(line.ends_with("ignored=0"));
    }
}
