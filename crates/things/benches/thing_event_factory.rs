use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hearth_core::{ChannelUid, ThingTypeUid, ThingUid};
use hearth_events::{Event, EventDispatcher, EventFactory, EventSubscriber};
use hearth_things::common_trigger_events::PRESSED;
use hearth_things::{
    Channel, Thing, ThingEvent, ThingEventFactory, ThingStatus, ThingStatusDetail, ThingStatusInfo,
};
use std::sync::Arc;

fn thing_uid() -> ThingUid {
    let thing_type = ThingTypeUid::new("binding", "type").unwrap();
    ThingUid::new(&thing_type, "id").unwrap()
}

fn status_info() -> ThingStatusInfo {
    ThingStatusInfo::new(ThingStatus::Offline, ThingStatusDetail::CommunicationError)
        .with_description("Some description")
}

fn thing_with_channels(count: usize) -> Thing {
    let uid = thing_uid();
    let mut thing = Thing::new(uid.thing_type_uid(), uid.clone()).with_label("Bench thing");
    for i in 0..count {
        let channel_uid = ChannelUid::new(&uid, &format!("c{i}")).unwrap();
        thing = thing
            .with_channel(Channel::state(channel_uid, "Number").with_label(format!("Channel {i}")))
            .unwrap();
    }
    thing
}

fn bench_builders(c: &mut Criterion) {
    let factory = ThingEventFactory::new().unwrap();
    let uid = thing_uid();
    let info = status_info();
    let channel = ChannelUid::new(&uid, "button").unwrap();

    let mut group = c.benchmark_group("builders");
    group.throughput(Throughput::Elements(1));

    group.bench_function("status_info", |b| {
        b.iter(|| {
            factory
                .create_status_info_event(black_box(&uid), black_box(&info))
                .unwrap()
        });
    });

    group.bench_function("trigger", |b| {
        b.iter(|| {
            factory
                .create_trigger_event(black_box(PRESSED), black_box(&channel))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_create_event(c: &mut Criterion) {
    let factory = ThingEventFactory::new().unwrap();
    let mut group = c.benchmark_group("create_event");

    let status: ThingEvent = factory
        .create_status_info_event(&thing_uid(), &status_info())
        .unwrap()
        .into();
    group.bench_function("status_info", |b| {
        b.iter(|| {
            factory
                .create_event(
                    black_box(status.event_type()),
                    black_box(status.topic()),
                    black_box(status.payload()),
                    None,
                )
                .unwrap()
        });
    });

    for channels in [0usize, 10, 100].iter() {
        let added: ThingEvent = factory
            .create_added_event(&thing_with_channels(*channels))
            .unwrap()
            .into();
        group.throughput(Throughput::Bytes(added.payload().len() as u64));
        group.bench_with_input(BenchmarkId::new("thing_added", channels), &added, |b, event| {
            b.iter(|| {
                factory
                    .create_event(
                        black_box(event.event_type()),
                        black_box(event.topic()),
                        black_box(event.payload()),
                        event.source(),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

struct Sink;

impl EventSubscriber<ThingEvent> for Sink {
    fn subscribed_event_types(&self) -> Vec<&'static str> {
        vec![hearth_events::ALL_EVENT_TYPES]
    }

    fn receive(&self, event: &ThingEvent) {
        black_box(event);
    }
}

fn bench_dispatch(c: &mut Criterion) {
    let factory = ThingEventFactory::new().unwrap();
    let envelope = factory
        .create_status_info_event(&thing_uid(), &status_info())
        .unwrap()
        .to_envelope();

    let mut dispatcher = EventDispatcher::new(factory);
    for _ in 0..4 {
        dispatcher.subscribe(Arc::new(Sink));
    }

    c.bench_function("dispatch_status_to_4_subscribers", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&envelope)).unwrap());
    });
}

criterion_group!(benches, bench_builders, bench_create_event, bench_dispatch);
criterion_main!(benches);
