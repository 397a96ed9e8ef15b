//! Decode a stream of back-to-back records, with apache_avro for comparison

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const RAW_PERSON_SCHEMA: &str = r#"
{
	"namespace": "test",
	"type": "record",
	"name": "Person",
	"fields": [
		{"name": "ID", "type": "long"},
		{"name": "First", "type": "string"},
		{"name": "Last", "type": "string"},
		{"name": "Birthday", "type": "long", "is_datetime": true},
		{"name": "Phone", "type": "string"},
		{"name": "Age", "type": "int"},
		{
			"name": "Suit",
			"type": {
				"type": "enum",
				"name": "Suit",
				"symbols": ["CLUBS", "DIAMONDS", "HEARTS", "SPADES"]
			}
		}
	]
}
"#;

const N_RECORDS: usize = 1000;

fn make_stream() -> anyhow::Result<(apache_avro::Schema, avro_datum_stream::Schema, Vec<u8>)> {
	let schema = apache_avro::Schema::parse_str(RAW_PERSON_SCHEMA)?;
	let fast_schema = RAW_PERSON_SCHEMA.parse()?;
	let mut stream = Vec::new();
	for i in 0..N_RECORDS {
		let mut record = apache_avro::types::Record::new(&schema).unwrap();
		record.put("ID", i as i64);
		record.put("First", "Zaphod");
		record.put("Last", "Beeblebrox");
		record.put("Birthday", 1_500_000_000_000_000_000i64 + i as i64);
		record.put("Phone", "555-0142");
		record.put("Age", 42i32);
		record.put(
			"Suit",
			apache_avro::types::Value::Enum(2, "HEARTS".to_owned()),
		);
		stream.extend(apache_avro::to_avro_datum(&schema, record)?);
	}
	Ok((schema, fast_schema, stream))
}

fn bench_person_stream(c: &mut Criterion) {
	let (schema, fast_schema, stream) = make_stream().unwrap();
	let mut group = c.benchmark_group("person_stream");
	group.throughput(Throughput::Elements(N_RECORDS as u64));
	group.bench_with_input(
		BenchmarkId::new("apache_avro", N_RECORDS),
		&stream.as_slice(),
		|b, &stream| {
			b.iter(|| {
				let mut reader = stream;
				let mut values = Vec::with_capacity(N_RECORDS);
				while !reader.is_empty() {
					values.push(apache_avro::from_avro_datum(&schema, &mut reader, None).unwrap());
				}
				values
			})
		},
	);
	group.bench_with_input(
		BenchmarkId::new("decode_sequence", N_RECORDS),
		&stream.as_slice(),
		|b, &stream| {
			b.iter(|| {
				avro_datum_stream::decode_sequence(
					stream,
					&fast_schema,
					avro_datum_stream::OutputMode::Tuple,
				)
				.unwrap()
			})
		},
	);
	group.bench_with_input(
		BenchmarkId::new("read_stream", N_RECORDS),
		&stream.as_slice(),
		|b, &stream| {
			b.iter(|| {
				avro_datum_stream::read_stream_tuples(&fast_schema, stream)
					.collect::<Result<Vec<_>, _>>()
					.unwrap()
			})
		},
	);
	group.finish();
}

criterion_group!(benches, bench_person_stream);
criterion_main!(benches);
