use super::*;
use notify::event::{CreateKind, ModifyKind, RenameMode};
use std::path::PathBuf;

const MS: Duration = Duration::from_millis(1);

fn filter() -> ChangeFilter {
    ChangeFilter::new("manifest.json", "manifest.json.tmp", Duration::from_millis(500))
}

fn event(kind: EventKind, names: &[&str]) -> Event {
    names.iter().fold(Event::new(kind), |ev, name| {
        ev.add_path(PathBuf::from("/site/assets").join(name))
    })
}

#[test]
fn image_change_is_accepted() {
    let ev = event(EventKind::Create(CreateKind::File), &["new.png"]);
    assert!(filter().accepts(&ev, Instant::now()));
}

#[test]
fn manifest_only_change_schedules_nothing() {
    let f = filter();
    let mut debouncer = Debouncer::new(200 * MS);
    let now = Instant::now();
    for ev in [
        event(EventKind::Create(CreateKind::File), &["manifest.json.tmp"]),
        event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["manifest.json.tmp", "manifest.json"],
        ),
        event(EventKind::Modify(ModifyKind::Any), &["manifest.json"]),
    ] {
        if f.accepts(&ev, now) {
            debouncer.trigger(now);
        }
    }
    assert!(!debouncer.is_pending());
}

#[test]
fn mixed_paths_are_accepted() {
    let ev = event(
        EventKind::Modify(ModifyKind::Any),
        &["manifest.json", "kuni_2.videos.json"],
    );
    assert!(filter().accepts(&ev, Instant::now()));
}

#[test]
fn pathless_event_is_accepted() {
    assert!(filter().accepts(&Event::new(EventKind::Any), Instant::now()));
}

#[test]
fn access_events_are_ignored() {
    let ev = event(
        EventKind::Access(notify::event::AccessKind::Any),
        &["videos.csv"],
    );
    assert!(!filter().accepts(&ev, Instant::now()));
}

#[test]
fn cooldown_suppresses_events_after_build() {
    let mut f = filter();
    let start = Instant::now();
    f.build_finished(start);
    let ev = event(EventKind::Modify(ModifyKind::Any), &["a.png"]);
    assert!(!f.accepts(&ev, start + 100 * MS));
    assert!(!f.accepts(&ev, start + 499 * MS));
    assert!(f.accepts(&ev, start + 500 * MS));
}

#[test]
fn debounce_new_trigger_replaces_deadline() {
    let mut d = Debouncer::new(200 * MS);
    let t0 = Instant::now();
    d.trigger(t0);
    d.trigger(t0 + 100 * MS);
    assert_eq!(d.deadline(), Some(t0 + 300 * MS));
    assert!(!d.take_due(t0 + 250 * MS));
    assert!(d.is_pending());
    assert!(d.take_due(t0 + 300 * MS));
    assert!(!d.is_pending());
    assert!(!d.take_due(t0 + 400 * MS));
}

#[test]
fn gate_allows_one_build_at_a_time() {
    let gate = BuildGate::new();
    let permit = gate.try_acquire().expect("gate should be free");
    assert!(gate.is_busy());
    assert!(gate.try_acquire().is_none());
    assert!(gate.clone().try_acquire().is_none());
    drop(permit);
    assert!(!gate.is_busy());
    assert!(gate.try_acquire().is_some());
}

#[test]
fn deadline_during_build_is_rearmed() {
    let gate = BuildGate::new();
    let _running = gate.try_acquire().unwrap();
    let mut d = Debouncer::new(200 * MS);
    let t0 = Instant::now();
    d.trigger(t0);

    let fired = t0 + 200 * MS;
    assert!(d.take_due(fired));
    if gate.try_acquire().is_none() {
        d.trigger(fired);
    }
    assert_eq!(d.deadline(), Some(fired + 200 * MS));
}

#[test]
fn first_remote_fetch_is_baseline() {
    let mut b = RemoteBaseline::default();
    assert!(!b.observe("a,b\n".into()));
    assert!(!b.observe("a,b\n".into()));
    assert!(b.observe("a,c\n".into()));
    assert!(!b.observe("a,c\n".into()));
}

#[test]
fn options_follow_settings() {
    let settings = Settings::defaults("/site");
    let opts = WatchOptions::from(&settings);
    assert_eq!(opts.debounce, 200 * MS);
    assert_eq!(opts.cooldown, 500 * MS);
    assert_eq!(opts.poll_interval, Duration::from_secs(30));
}

#[test]
fn filter_uses_configured_output_name() {
    let mut settings = Settings::defaults("/site");
    settings.output_file = "gallery.json".into();
    let f = ChangeFilter::for_settings(&settings);
    let ev = event(EventKind::Modify(ModifyKind::Any), &["gallery.json.tmp"]);
    assert!(!f.accepts(&ev, Instant::now()));
    let ev = event(EventKind::Modify(ModifyKind::Any), &["manifest.json"]);
    assert!(f.accepts(&ev, Instant::now()));
}
