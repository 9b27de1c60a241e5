//! First-run setup instructions, shown when no backend is configured.

/// Print the setup screen. Every command routes here when
/// `SUPABASE_URL` / `SUPABASE_ANON_KEY` are missing, since nothing works
/// without them.
pub fn print_setup_instructions() {
    eprintln!(
        "\
CrowdColor is not configured yet.

It needs a Supabase project to talk to. Set these environment variables
(or put them in a .env file next to where you run the command):

  SUPABASE_URL        Your project URL, e.g. https://xyzcompany.supabase.co
  SUPABASE_ANON_KEY   The project's anon (public) API key

Both values are on your project's API settings page. The project needs:

  - a `boards` table and a `pixels` table (see the project README),
  - a public storage bucket named `board-images`,
  - realtime enabled for the `pixels` table.

Then try again."
    );
}
