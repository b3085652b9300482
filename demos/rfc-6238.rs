use totp_gen::{Algorithm, Rfc6238, Totp};

fn main() {
    let mut rfc = Rfc6238::with_defaults();

    // optional, set digits and algorithm
    rfc.digits(8).unwrap();
    rfc.algorithm(Algorithm::SHA256);

    // create a Totp from rfc
    let totp = Totp::from_rfc6238(rfc).unwrap();
    println!("{}", totp);

    let code = totp
        .compute_current("12345678901234567890123456789012")
        .unwrap();
    println!("code: {}", code);
}
