//! Benchmark – printf-subset conversion and template expansion into stack
//! buffers.
#![allow(missing_docs)]

use boundfmt::{
    Arg, LOWER_ALPHABET, Record, StrBuf, format_into, format_record_into, int_to_text_into,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const TEMPLATES: [(&str, &str); 3] = [
    ("message", "%(message)s"),
    ("default", "%(asctime)s - %(levelname)s - %(message)s"),
    (
        "verbose",
        "%(asctime)s,%(msecs)d %(name)s[%(process)d/%(threadName)s] %(filename)s:%(lineno)d %(funcName)s %(levelname)s: %(message)s",
    ),
];

fn bench_printf(c: &mut Criterion) {
    let args = [
        Arg::from("request"),
        Arg::from(404),
        Arg::from(18_446_744_073_709u64),
        Arg::from(0xdead_beefu32),
        Arg::from('!'),
    ];
    c.bench_function("printf_mixed", |b| {
        b.iter(|| {
            let mut buf = [0u8; 256];
            let n = format_into(&mut buf, 0, black_box("%s failed: %5d after %llu bytes (%#010x)%c"), black_box(&args));
            black_box(n)
        });
    });

    let mut group = c.benchmark_group("int_to_text");
    for base in [8u32, 10, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(base), &base, |b, &base| {
            b.iter(|| {
                let mut buf = [0u8; 32];
                black_box(int_to_text_into(&mut buf, 0, black_box(u64::MAX), base, LOWER_ALPHABET))
            });
        });
    }
    group.finish();
}

fn bench_templates(c: &mut Criterion) {
    let message_args = [Arg::from("/var/lib/db"), Arg::from(93)];
    let record = Record {
        name: "root",
        level_number: 30,
        level_name: "WARN",
        source_path: "src/storage/volume.rs",
        file_name: "volume.rs",
        function_name: "storage::volume::check",
        line_number: 212,
        created: 1_700_000_000.25,
        relative_created: 1234.5,
        timestamp: "2023-11-14 22:13:20",
        msecs: 250,
        thread_id: 3,
        thread_name: "main",
        process_id: 4242,
        message_format: "%s is %d%% full",
        message_args: &message_args,
    };

    let mut group = c.benchmark_group("template");
    for (name, template) in TEMPLATES {
        group.bench_with_input(BenchmarkId::from_parameter(name), template, |b, template| {
            b.iter(|| {
                let mut buf = [0u8; 1024];
                black_box(format_record_into(&mut buf, black_box(template), &record))
            });
        });
    }
    group.finish();

    c.bench_function("template_truncated", |b| {
        b.iter(|| {
            let mut storage = [0u8; 16];
            let mut buf = StrBuf::new(&mut storage);
            black_box(buf.format_record(black_box(TEMPLATES[2].1), &record))
        });
    });
}

criterion_group!(benches, bench_printf, bench_templates);
criterion_main!(benches);
