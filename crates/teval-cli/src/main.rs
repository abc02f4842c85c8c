use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use teval_cli::create_admin;
use teval_cli::seeder::{self, SeedConfig};
use teval_db::{PgPool, Store, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "teval-cli")]
#[command(about = "Teval CLI - Administrative tools for the Teval API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Full name of the admin
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Grant the Super Admin role instead of Admin
        #[arg(long)]
        super_admin: bool,
    },
    /// Apply pending database migrations
    Migrate,
    /// Seed levels, sections, teachers, subjects, students, and enrollments
    Seed {
        /// Number of teachers per level
        #[arg(long, default_value = "3")]
        teachers: usize,

        /// Number of subjects per teacher
        #[arg(long, default_value = "2")]
        subjects: usize,

        /// Number of students per level
        #[arg(long, default_value = "20")]
        students: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await;

    match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
            super_admin,
        } => handle_create_admin(pool, full_name, email, password, super_admin).await,
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed {
            teachers,
            subjects,
            students,
        } => {
            let config = SeedConfig {
                teachers_per_level: teachers,
                subjects_per_teacher: subjects,
                students_per_level: students,
            };
            handle_seed(pool, config).await
        }
    }
}

async fn handle_create_admin(
    pool: PgPool,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    super_admin: bool,
) {
    let full_name = full_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Full name")
            .interact_text()
            .expect("Failed to read full name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    let store = Store::postgres(pool);
    match create_admin(&store, &full_name, &email, &password, super_admin).await {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {}", admin.full_name);
            println!("   Role: {}", admin.role_name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: PgPool, config: SeedConfig) {
    let store = Store::postgres(pool);
    if let Err(e) = seeder::seed_all(&store, &config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}
