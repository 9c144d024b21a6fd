//! Schema coercion, exclusion and post-decode hooks

use once_cell::sync::Lazy;
use std::sync::Arc;
use tagwire::{
    Codec, DecodeError, DecodeOptions, Error, Model, Record, RecordError, RecordSchema, Value,
};

static CUSTOMER: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    RecordSchema::new("Customer")
        .field("name", "")
        .field("vip", false)
        .build()
});

static ORDER: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    RecordSchema::new("Order")
        .field("id", 0i64)
        .field("customer", Value::Null)
        .field("items", Value::List(vec![]))
        .field("total", 0.0)
        .field("note", Value::Null)
        .exclude("note")
        .post_decode(nest_customer)
        .build()
});

/// Re-read the nested customer map as a Customer record
fn nest_customer(mut record: Record) -> Result<Record, RecordError> {
    match record.take("customer")? {
        Value::Map(map) => {
            record.set("customer", Record::coerce(map, Arc::clone(&CUSTOMER)))?;
        }
        other => {
            record.set("customer", other)?;
        }
    }
    Ok(record)
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Customer {
    name: String,
    vip: bool,
}

impl Model for Customer {
    fn schema() -> Arc<RecordSchema> {
        Arc::clone(&CUSTOMER)
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new(Self::schema());
        record.set("name", self.name.as_str()).unwrap();
        record.set("vip", self.vip).unwrap();
        record
    }

    fn from_record(mut record: Record) -> Result<Self, RecordError> {
        Ok(Self {
            name: record.take_string("name")?,
            vip: record.take_bool("vip")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: i64,
    customer: Customer,
    items: Vec<String>,
    total: f64,
    note: Option<String>,
}

impl Model for Order {
    fn schema() -> Arc<RecordSchema> {
        Arc::clone(&ORDER)
    }

    fn to_record(&self) -> Record {
        let items: Vec<Value> = self.items.iter().map(|i| Value::from(i.as_str())).collect();
        let mut record = Record::new(Self::schema());
        record.set("id", self.id).unwrap();
        record.set("customer", self.customer.to_record()).unwrap();
        record.set("items", items).unwrap();
        record.set("total", self.total).unwrap();
        record.set("note", self.note.clone()).unwrap();
        record
    }

    fn from_record(mut record: Record) -> Result<Self, RecordError> {
        let customer = match record.take("customer")? {
            Value::Record(r) => Customer::from_record(r)?,
            Value::Null => Customer::default(),
            other => {
                return Err(RecordError::WrongType {
                    field: "customer".into(),
                    expected: "Record",
                    actual: other.type_name(),
                })
            }
        };
        let items = match record.take("items")? {
            Value::List(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        let note = match record.take("note")? {
            Value::String(s) => Some(s),
            _ => None,
        };
        Ok(Self {
            id: record.take_int("id")?,
            customer,
            items,
            total: record.take_float("total")?,
            note,
        })
    }
}

fn sample_order() -> Order {
    Order {
        id: 1001,
        customer: Customer {
            name: "Ada".into(),
            vip: true,
        },
        items: vec!["widget".into(), "gizmo".into()],
        total: 20.0,
        note: Some("gift wrap".into()),
    }
}

#[test]
fn test_model_round_trip_without_excluded_field() {
    super::init_tracing();
    let codec = Codec::new();
    let order = sample_order();

    let item = codec.encode_model(&order).unwrap();
    assert!(!item.contains_key("note"));
    assert!(item.contains_key("customer"));

    let decoded: Order = codec.decode_model(&item).unwrap();
    assert_eq!(
        decoded,
        Order {
            note: None,
            ..order
        }
    );
}

#[test]
fn test_post_decode_hook_converts_nested_map() {
    super::init_tracing();
    let doc = Value::map([
        ("id", Value::Int(5)),
        (
            "customer",
            Value::map([("name", Value::from("Bo")), ("loyalty", Value::Int(3))]),
        ),
    ]);
    let item = Codec::new().encode_item(&doc).unwrap();

    let codec = Codec::builder().schema(Order::schema()).build();
    let value = codec.decode_item(&item).unwrap();
    let record = value.as_record().unwrap();

    let customer = record.get("customer").and_then(Value::as_record).unwrap();
    assert_eq!(customer.schema().name(), "Customer");
    assert_eq!(customer.get("name"), Some(&Value::from("Bo")));
    assert_eq!(customer.get("vip"), Some(&Value::Bool(false)));
    assert!(customer.get("loyalty").is_none());
}

#[test]
fn test_coercion_defaults_and_drops() {
    super::init_tracing();
    let doc = Value::map([("id", Value::Int(9)), ("coupon", Value::from("SAVE"))]);
    let item = Codec::new().encode_item(&doc).unwrap();

    let order: Order = Codec::new().decode_model(&item).unwrap();
    assert_eq!(order.id, 9);
    assert_eq!(order.customer, Customer::default());
    assert!(order.items.is_empty());
    assert_eq!(order.total, 0.0);
}

#[test]
fn test_decode_options_with_schema_on_free_function() {
    let attr = tagwire::encode(&Value::map([("name", "Cy")])).unwrap();
    let options = DecodeOptions::new().with_schema(Customer::schema());
    let value = tagwire::decode(&attr, &options).unwrap();
    let customer = Customer::from_record(value.as_record().unwrap().clone()).unwrap();
    assert_eq!(
        customer,
        Customer {
            name: "Cy".into(),
            vip: false
        }
    );
}

#[test]
fn test_model_type_mismatch_surfaces_record_error() {
    let doc = Value::map([("id", Value::from("not an int"))]);
    let item = Codec::new().encode_item(&doc).unwrap();

    let err = Codec::new().decode_model::<Order>(&item).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Record(RecordError::WrongType { .. }))
    ));
    assert!(!err.is_malformed());
}
