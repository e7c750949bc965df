/// Benchmark to determine the cost of string pack edits during the table update pass.
use altra_smbios_cpu::string_pack::{build_string_pack, string_pack_size, update_string_pack};
use criterion::{Bencher, Criterion, criterion_group, criterion_main};

fn type4_pack() -> Vec<u8> {
    build_string_pack(&[
        "SOCKET 0",
        "Ampere(R)",
        "Ampere(R) Altra(R) Max Processor",
        "NotSet",
        "Not Specified                     ",
    ])
}

fn replace_equal_length(b: &mut Bencher<'_>) {
    b.iter_batched(
        type4_pack,
        |mut pack| {
            update_string_pack(&mut pack, 1, "SOCKET 1").unwrap();
        },
        criterion::BatchSize::SmallInput,
    )
}

fn replace_with_shift(b: &mut Bencher<'_>) {
    b.iter_batched(
        type4_pack,
        |mut pack| {
            update_string_pack(&mut pack, 3, "Ampere(R) Altra(R) Processor").unwrap();
        },
        criterion::BatchSize::SmallInput,
    )
}

fn replace_final_in_place(b: &mut Bencher<'_>) {
    b.iter_batched(
        type4_pack,
        |mut pack| {
            update_string_pack(&mut pack, 5, "11112222333344445555666677778888").unwrap();
        },
        criterion::BatchSize::SmallInput,
    )
}

fn full_update_pass(b: &mut Bencher<'_>) {
    b.iter_batched(
        type4_pack,
        |mut pack| {
            update_string_pack(&mut pack, 1, "CPU 0").unwrap();
            update_string_pack(&mut pack, 3, "Ampere(R) Altra(R) Processor").unwrap();
            update_string_pack(&mut pack, 4, "Q80-34").unwrap();
            update_string_pack(&mut pack, 5, "11112222333344445555666677778888").unwrap();
            string_pack_size(&pack)
        },
        criterion::BatchSize::SmallInput,
    )
}

fn benchmarks(c: &mut Criterion) {
    c.bench_function("replace_equal_length", replace_equal_length);
    c.bench_function("replace_with_shift", replace_with_shift);
    c.bench_function("replace_final_in_place", replace_final_in_place);
    c.bench_function("full_update_pass", full_update_pass);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
