use std::time::SystemTime;
use totp_gen::{Algorithm, Totp};

fn main() {
    let totp = Totp::new(Algorithm::SHA1, 6, 30).unwrap();
    let key = "my-secret-my-secret";

    loop {
        let now = SystemTime::now();
        println!(
            "code {}\t ttl {}\t valid until: {}",
            totp.compute(key, now).unwrap(),
            totp.ttl(now).unwrap(),
            totp.next_step(now).unwrap()
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
