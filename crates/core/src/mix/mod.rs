pub mod snr;
