//! Basic usage examples for MiniPack
//!
//! Run with: cargo run --example basic_usage

use minipack::*;

fn main() -> Result<(), Error> {
    println!("MiniPack Basic Usage Examples");
    println!("=============================");

    // Example 1: Scalars
    println!("\n1. Scalars:");
    {
        let mut encoder = Encoder::new();
        encoder.put_nil();
        encoder.put_bool(true);
        encoder.put_int(-33);
        encoder.put_uint(65_536);
        encoder.put_f64(0.5);
        encoder.put_str("hello")?;

        let bytes = encoder.dump(None);
        println!("  Encoded {} bytes: {:02X?}", bytes.len(), bytes);

        let mut decoder = Decoder::new(&bytes);
        println!("  nil:    {}", decoder.check_nil());
        println!("  bool:   {}", decoder.expect_bool()?);
        println!("  int:    {}", decoder.expect_integer()?);
        println!("  uint:   {}", decoder.expect_integer()?);
        println!("  float:  {:?}", decoder.expect_number()?);
        println!("  string: {:?}", decoder.expect_str()?);
    }

    // Example 2: Caller-driven containers
    println!("\n2. Map with a nested array:");
    {
        let mut encoder = Encoder::new();
        encoder.put_map_len(2)?;
        encoder.put_str("symbol")?;
        encoder.put_str("AAPL")?;
        encoder.put_str("fills")?;
        encoder.put_array_len(3)?;
        for qty in [100, 250, 50] {
            encoder.put_int(qty);
        }

        let bytes = encoder.dump(None);
        println!("  Encoded {} bytes", bytes.len());

        let mut decoder = Decoder::new(&bytes);
        for _ in 0..decoder.expect_map()? {
            let key = decoder.expect_str()?;
            if key == "fills" {
                let mut fills = Vec::new();
                for _ in 0..decoder.expect_array()? {
                    fills.push(decoder.expect_integer()?);
                }
                println!("  {} = {:?}", key, fills);
            } else {
                println!("  {} = {:?}", key, decoder.expect_str()?);
            }
        }
    }

    // Example 3: Speculative decoding
    println!("\n3. Speculative decoding:");
    {
        let mut encoder = Encoder::new();
        encoder.put_str("not a number")?;
        let bytes = encoder.dump(None);

        let mut decoder = Decoder::new(&bytes);
        match decoder.expect_number() {
            Ok(n) => println!("  number: {:?}", n),
            Err(e) => println!("  {} (cursor still at {})", e, decoder.position()),
        }
        println!("  retried as string: {:?}", decoder.expect_str()?);
    }

    // Example 4: Extensions and binary
    println!("\n4. Extensions and binary:");
    {
        let mut encoder = Encoder::new();
        encoder.put_ext(-1, &1_700_000_000u32.to_be_bytes())?;
        encoder.put_bin(&[0xDE, 0xAD, 0xBE, 0xEF])?;

        let bytes = encoder.dump(None);
        let mut decoder = Decoder::new(&bytes);
        let ext = decoder.expect_ext()?;
        println!("  ext type {} with {} bytes", ext.type_id, ext.data.len());
        println!("  bin {:02X?}", decoder.expect_bin()?);
    }

    // Example 5: Forwarding an unparsed tail
    println!("\n5. Forwarding the rest:");
    {
        let mut upstream = Encoder::new();
        upstream.put_int(1);
        upstream.put_str("opaque body")?;
        let input = upstream.dump(None);

        let mut decoder = Decoder::new(&input);
        let version = decoder.expect_integer()?;

        let mut encoder = Encoder::new();
        encoder.put_int(2);
        let output = encoder.dump(Some(decoder.get_rest()));
        println!(
            "  version {} -> 2, forwarded {} bytes untouched",
            version,
            decoder.remaining()
        );
        println!("  output: {:02X?}", output);
    }

    // Example 6: Size class analysis
    println!("\n6. Size Class Analysis:");
    {
        let sizes: [(&str, i64); 6] = [
            ("fixint 127", 127),
            ("uint 8", 255),
            ("uint 16", 65_535),
            ("negative fixint", -32),
            ("int 8", -128),
            ("int 32", -2_147_483_648),
        ];

        for (name, value) in sizes {
            let mut encoder = Encoder::new();
            encoder.put_int(value);
            println!("  {}: {} bytes", name, encoder.len());
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
