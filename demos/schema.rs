// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use edn_elements::datom::{Datom, T};
use edn_elements::schema::{check_cardinality, Schema};
use edn_elements::types::ElementType;
use edn_elements::value::{Builder, CollectionBuilder, Element};
use edn_elements::write::{write_all, write_file};
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use anyhow::{Result, anyhow, bail};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Name of the schema (a symbol, e.g. my/foo)
    #[clap(short, long, value_parser, default_value = "my/schema")]
    name: String,
    /// Attribute as name:type[:cardinality[:doc]], e.g.
    /// person/name:string:one:"The name"; can be repeated
    #[clap(short, long, value_parser)]
    attribute: Vec<String>,
    /// Also write an example datom asserting each attribute
    #[clap(long, value_parser)]
    datoms: bool,
    /// Write to this file instead of stdout
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
}

fn add_attribute(schema: &mut Schema, definition: &str) -> Result<()> {
    let mut fields = definition.splitn(4, ':');
    let name = fields.next().unwrap_or_default();
    let type_name = match fields.next() {
        Some(t) => t,
        None => bail!("missing type in attribute {:?}", definition),
    };
    let element_type = ElementType::try_from(type_name)
        .map_err(|()| anyhow!("unknown type {:?}", type_name))?;
    if element_type.is_reserved() || element_type.is_collection() {
        bail!("type {} can't be used for attribute values", element_type)
    }
    let cardinality = check_cardinality(
        &format!(":db.cardinality/{}", fields.next().unwrap_or("one")))?;
    let doc = fields.next();
    schema.add_attribute(name, element_type, cardinality, doc)?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut schema = Schema::new(&args.name)?;
    for definition in &args.attribute {
        add_attribute(&mut schema, definition)?;
    }

    let mut vals: Vec<Element> = vec![schema.build_collection()?];
    if args.datoms {
        for (i, attr) in schema.attributes().iter().enumerate() {
            let i = i as i64;
            let value = attr.name().unwrap_or_default();
            vals.push(Datom::new(17592186045418 + i, 63 + i, value, T(13194139534312),
                                 true).build()?);
        }
    }

    if let Some(path) = &args.output {
        write_file(path, &vals)?;
    } else {
        write_all(BufWriter::new(stdout()), &vals)?;
    }
    Ok(())
}
