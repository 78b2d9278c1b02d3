//! Tracing tests: what a traced match records and how it is rendered.

use phrasebook_pattern::{TraceEvent, Tracer, TracerConfig, compile};

fn traced(grammar: &str, input: &str, config: TracerConfig) -> (bool, Tracer) {
    let pattern = compile(grammar).unwrap();
    let mut tracer = Tracer::new(config.enabled());
    let success = pattern.matches_traced(input, false, &mut tracer).is_success();
    (success, tracer)
}

#[test]
fn trace_ends_with_the_outcome() {
    let (success, tracer) = traced("go (north|south)", "go south", TracerConfig::new());
    assert!(success);
    assert!(tracer.buffer().len() > 2);
    let last = tracer.buffer().last().unwrap();
    assert!(matches!(
        last.event,
        TraceEvent::MatchFinished {
            success: true,
            mark: 0,
            leftover: None
        }
    ));
}

#[test]
fn alternatives_are_recorded_in_order() {
    let (_, tracer) = traced("(a|b|c)", "c", TracerConfig::new());
    let indices: Vec<usize> = tracer
        .buffer()
        .iter()
        .filter_map(|r| match r.event {
            TraceEvent::AlternativeTried { index, .. } => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn space_rules_are_visible() {
    let (success, tracer) = traced("[a] [b] c", "c", TracerConfig::new());
    assert!(success);
    assert!(tracer.buffer().iter().any(|r| r.event.is_space_event()));
}

#[test]
fn event_filter_keeps_only_named_types() {
    let config = TracerConfig::new().filter_events(vec!["match-finished".to_string()]);
    let (_, tracer) = traced("x [y] z", "x z", config);
    assert_eq!(tracer.buffer().len(), 1);
}

#[test]
fn small_buffer_evicts_oldest() {
    let (_, tracer) = traced("%a% %b% %c%", "one two three", TracerConfig::new().with_buffer_size(4));
    let stats = tracer.stats();
    assert_eq!(stats.record_count, 4);
    assert!(stats.evicted > 0);
    assert!(matches!(
        tracer.buffer().last().unwrap().event,
        TraceEvent::MatchFinished { .. }
    ));
}

#[test]
fn human_output_shows_failure() {
    let (success, tracer) = traced("look", "jump", TracerConfig::new());
    assert!(!success);
    let text = tracer.format_all();
    assert!(text.contains("literal FAILED"));
    assert!(text.ends_with("=== MATCH FAILED mark=0"));
}

#[test]
fn json_output_is_one_object_per_record() {
    let (_, tracer) = traced("look", "look", TracerConfig::new().json());
    let text = tracer.format_all();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), tracer.buffer().len());
    assert!(lines.iter().all(|l| l.starts_with("{\"id\":") && l.ends_with('}')));
    assert!(lines.last().unwrap().contains("\"type\":\"match-finished\""));
}

#[test]
fn disabled_tracer_costs_nothing() {
    let pattern = compile("(a|b) [c]").unwrap();
    let mut tracer = Tracer::disabled();
    assert!(pattern.matches_traced("b c", false, &mut tracer).is_success());
    assert!(tracer.buffer().is_empty());
}
