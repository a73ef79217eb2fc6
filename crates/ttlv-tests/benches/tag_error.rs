use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ttlv_errors::{CodecError, Error, Tag, tag_error};
use ttlv_tests::{encoded, header_offset, request_message};
use ttlv_types::ItemType;
use ttlv_wire::decode;

fn bench_tag_error(c: &mut Criterion) {
    c.bench_function("tag_error", |b| {
        b.iter(|| tag_error(CodecError::InvalidLen, Tag::KEY_VALUE, &ItemType::Structure));
    });

    let mut group = c.benchmark_group("push_path");
    for depth in [1_usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                (0..depth).fold(
                    tag_error(CodecError::InvalidLen, Tag::KEY_VALUE, &()),
                    |err, _| err.push_path(Tag::KEY_BLOCK),
                )
            });
        });
    }
    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let err = (0..16).fold(
        tag_error(CodecError::ValueTruncated, Tag::KEY_MATERIAL, &()),
        |err: Error, _| Error::wrap(err),
    );

    c.bench_function("is_deep", |b| {
        b.iter(|| err.is(&[CodecError::ValueTruncated]));
    });
    c.bench_function("details_deep", |b| {
        b.iter(|| err.details());
    });
}

fn bench_failed_decode(c: &mut Criterion) {
    let good = encoded(&request_message(8));
    let mut bad = good.clone();
    if let Some(at) = header_offset(&bad, Tag::BATCH_COUNT) {
        bad[at + 7] = 8;
    }

    let mut group = c.benchmark_group("decode");
    group.bench_function("ok", |b| b.iter(|| decode(&good)));
    group.bench_function("failure", |b| b.iter(|| decode(&bad)));
    group.finish();
}

criterion_group!(benches, bench_tag_error, bench_lookups, bench_failed_decode);
criterion_main!(benches);
